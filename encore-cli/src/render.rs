use encore_core::{AvailabilityView, SalesReport};

const RULE: &str = "==================================================";

pub fn render_availability(view: &AvailabilityView) -> String {
    let mut out = format!("AVAILABLE TICKETS ({})\n", view.total_available);
    if view.visible.is_empty() {
        out.push_str("  No tickets available\n");
        return out;
    }
    for ticket in &view.visible {
        out.push_str(&format!("  {ticket}\n"));
    }
    if view.hidden > 0 {
        out.push_str(&format!(
            "  ... and {} more tickets available\n",
            view.hidden
        ));
    }
    out
}

pub fn render_report(report: &SalesReport) -> String {
    let mut out = String::new();
    out.push_str("SALES & ATTENDANCE REPORT\n");
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!(
        "Tickets Sold: {}/{} ({:.1}%)\n",
        report.sold_count, report.total_tickets, report.sold_percentage
    ));
    out.push_str(&format!("Gross Revenue: ₱{:.2}\n", report.gross_revenue));
    out.push_str(&format!(
        "Total Attendance: {}/{} ({:.1}%)\n",
        report.attendance, report.venue_capacity, report.attendance_percentage
    ));
    out.push_str(&format!("Valid Transactions: {}\n", report.total_sales));
    out.push_str(RULE);
    out.push('\n');

    if !report.recent_sales.is_empty() {
        out.push_str("\nRECENT TRANSACTIONS\n");
        for (i, sale) in report.recent_sales.iter().enumerate() {
            out.push_str(&format!(
                "  {}. {} -> {} | {}\n",
                i + 1,
                sale.user,
                sale.ticket,
                sale.payment
            ));
        }
    }
    out
}

pub fn render_report_json(report: &SalesReport) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
