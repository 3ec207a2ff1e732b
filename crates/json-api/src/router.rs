//! App Router

use salvo::Router;

use crate::{
    auth, checkout, healthcheck, observability::metrics_handler, orders, products, promotions,
    reports, settings, storefront,
};

/// Public storefront routes plus the password-protected `admin` tree.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(metrics_handler))
        .push(Router::with_path("catalog").get(storefront::catalog::handler))
        .push(Router::with_path("announcement").get(storefront::announcement::handler))
        .push(Router::with_path("checkout").post(checkout::create::handler))
        .push(admin_router())
}

fn admin_router() -> Router {
    Router::with_path("admin")
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .get(products::get::handler)
                        .put(products::update::handler)
                        .delete(products::delete::handler)
                        .push(Router::with_path("visibility").put(products::visibility::handler))
                        .push(Router::with_path("promotion").put(products::promotion::handler)),
                ),
        )
        .push(Router::with_path("promotions/bulk").post(promotions::bulk::handler))
        .push(
            Router::with_path("orders").get(orders::index::handler).push(
                Router::with_path("{order}")
                    .patch(orders::update::handler)
                    .delete(orders::delete::handler),
            ),
        )
        .push(
            Router::with_path("reports")
                .push(Router::with_path("orders.txt").get(reports::whatsapp::handler))
                .push(Router::with_path("orders-table.txt").get(reports::table::handler)),
        )
        .push(
            Router::with_path("settings/popup")
                .get(settings::popup::get_handler)
                .put(settings::popup::put_handler),
        )
}
