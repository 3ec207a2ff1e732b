//! Order Reports
//!
//! Plain-text exports of the order list: a WhatsApp-friendly report and a text table.

use jiff::{Timestamp, tz::TimeZone};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

use crate::{orders::Order, pricing::format_brl};

/// Line separating orders in the WhatsApp report.
pub const ORDER_SEPARATOR: &str = "---------------------------------------";

const NO_OBSERVATION: &str = "Nenhuma";

/// `dd/mm/yyyy HH:MM` in the store's time zone.
pub fn format_order_date(date: Timestamp, time_zone: &TimeZone) -> String {
    date.to_zoned(time_zone.clone())
        .strftime("%d/%m/%Y %H:%M")
        .to_string()
}

/// Sum of the order totals.
pub fn grand_total(orders: &[Order]) -> u64 {
    orders
        .iter()
        .fold(0, |total: u64, order| total.saturating_add(order.total_price))
}

fn observation_or_default(order: &Order) -> &str {
    let observation = order.observation.trim();

    if observation.is_empty() {
        NO_OBSERVATION
    } else {
        observation
    }
}

fn whatsapp_block(order: &Order, time_zone: &TimeZone) -> String {
    let items = order
        .items
        .iter()
        .map(|item| {
            format!(
                "- {}x {} ({})",
                item.quantity,
                item.name.to_uppercase(),
                format_brl(item.line_total())
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "*Pedido de: {}*\n*CPF:* {}\n*Data:* {}\n\n*Itens:*\n{}\n\n*Total:* {}\n*Status da Venda:* {}\n*Status do Cadastro:* {}\n*Observação:* {}\n{ORDER_SEPARATOR}",
        order.customer.name,
        order.customer.national_id,
        format_order_date(order.date, time_zone),
        items,
        format_brl(order.total_price),
        order.status.label(),
        order.customer_status.label(),
        observation_or_default(order),
    )
}

/// WhatsApp text report, one block per order in the given order.
pub fn whatsapp_report(orders: &[Order], time_zone: &TimeZone) -> String {
    orders
        .iter()
        .map(|order| whatsapp_block(order, time_zone))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Text table of the orders followed by the grand total.
pub fn orders_table(orders: &[Order], time_zone: &TimeZone) -> String {
    let mut builder = Builder::default();

    builder.push_record([
        "Data",
        "Cliente",
        "CPF",
        "Cadastro",
        "Produtos",
        "Status",
        "Observação",
        "Total",
    ]);

    for order in orders {
        let products = order
            .items
            .iter()
            .map(|item| format!("{}x {}", item.quantity, item.name))
            .collect::<Vec<_>>()
            .join("\n");

        builder.push_record([
            format_order_date(order.date, time_zone),
            order.customer.name.clone(),
            order.customer.national_id.clone(),
            order.customer_status.label().to_string(),
            products,
            order.status.label().to_string(),
            observation_or_default(order).to_string(),
            format_brl(order.total_price),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::last(), Alignment::right());

    format!(
        "{table}\nTotal Geral: {}",
        format_brl(grand_total(orders))
    )
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        customers::Customer,
        orders::{OrderItem, RegistrationStatus, SaleStatus},
        products::ProductId,
    };

    use super::*;

    fn order(observation: &str) -> TestResult<Order> {
        let mut order = Order::place(
            Customer {
                name: "Ana Lima".to_string(),
                email: "ana@example.com".to_string(),
                national_id: "111.111.111-11".to_string(),
            },
            vec![OrderItem {
                product_id: ProductId::new(1),
                name: "Bao He Wan".to_string(),
                unit_price: 7_500,
                quantity: 2,
            }],
            RegistrationStatus::Registered,
            // 2024-06-15T17:30:00Z, 14:30 in São Paulo
            "2024-06-15T17:30:00Z".parse()?,
        );

        order.status = SaleStatus::Completed;
        order.observation = observation.to_string();

        Ok(order)
    }

    fn sao_paulo() -> TestResult<TimeZone> {
        Ok(TimeZone::get("America/Sao_Paulo")?)
    }

    #[test]
    fn dates_use_the_store_time_zone() -> TestResult {
        let date: Timestamp = "2024-06-15T17:30:00Z".parse()?;

        assert_eq!(format_order_date(date, &sao_paulo()?), "15/06/2024 14:30");
        assert_eq!(format_order_date(date, &TimeZone::UTC), "15/06/2024 17:30");

        Ok(())
    }

    #[test]
    fn whatsapp_report_block() -> TestResult {
        let report = whatsapp_report(&[order("")?], &sao_paulo()?);

        let expected = format!(
            "*Pedido de: Ana Lima*\n*CPF:* 111.111.111-11\n*Data:* 15/06/2024 14:30\n\n*Itens:*\n- 2x BAO HE WAN ({total})\n\n*Total:* {total}\n*Status da Venda:* Concluída\n*Status do Cadastro:* Realizado\n*Observação:* Nenhuma\n{ORDER_SEPARATOR}",
            total = format_brl(15_000),
        );

        assert_eq!(report, expected);

        Ok(())
    }

    #[test]
    fn whatsapp_report_joins_blocks() -> TestResult {
        let report = whatsapp_report(&[order("a")?, order("b")?], &TimeZone::UTC);

        assert_eq!(report.matches(ORDER_SEPARATOR).count(), 2);
        assert!(report.contains(&format!("{ORDER_SEPARATOR}\n\n*Pedido de:")));
        assert!(report.contains("*Observação:* a"));

        Ok(())
    }

    #[test]
    fn table_lists_orders_and_grand_total() -> TestResult {
        let orders = [order("ligar antes")?, order("")?];

        let table = orders_table(&orders, &sao_paulo()?);

        assert_eq!(grand_total(&orders), 30_000);
        assert!(table.contains("ligar antes"));
        assert!(table.contains("2x Bao He Wan"));
        assert!(table.ends_with(&format!("Total Geral: {}", format_brl(30_000))));

        Ok(())
    }

    #[test]
    fn empty_report() {
        assert_eq!(whatsapp_report(&[], &TimeZone::UTC), "");
        assert_eq!(grand_total(&[]), 0);
    }
}
