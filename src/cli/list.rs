use console::style;
use guardtool_dashboard::config::load_settings;
use guardtool_dashboard::errors::DashboardError;
use guardtool_dashboard::models::report::ReportListing;
use guardtool_dashboard::store::index;

use crate::cli::commands::ListArgs;

pub async fn handle_list(args: ListArgs, no_color: bool) -> Result<(), DashboardError> {
    let settings = load_settings(args.source.config_path(), args.source.layer()).await?;
    let dir = settings.reports_dir.clone();
    let limit = args.limit;

    let listings = tokio::task::spawn_blocking(move || index::list(&dir, limit))
        .await
        .map_err(|e| DashboardError::Internal(format!("Listing task failed: {}", e)))??;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&listings)?);
        return Ok(());
    }

    if listings.is_empty() {
        println!("No reports in {}", settings.reports_dir.display());
        return Ok(());
    }

    if no_color {
        console::set_colors_enabled(false);
    }
    println!(
        "{:<40} {:<20} {:>5} {:>6} {:<6} {:>4} {:>4} {:>4} {:>4} {:>5}",
        "NAME", "TIMESTAMP", "GRADE", "SCORE", "STATUS", "CRIT", "HIGH", "MED", "LOW", "SARIF"
    );
    for row in &listings {
        println!("{}", format_row(row));
    }
    Ok(())
}

fn format_row(row: &ReportListing) -> String {
    let status = match row.status.to_ascii_uppercase().as_str() {
        "PASS" => style(format!("{:<6}", row.status)).green(),
        "FAIL" => style(format!("{:<6}", row.status)).red(),
        _ => style(format!("{:<6}", row.status)).yellow(),
    };
    let critical = if row.critical > 0 {
        style(format!("{:>4}", row.critical)).red().bold()
    } else {
        style(format!("{:>4}", row.critical))
    };
    format!(
        "{:<40} {:<20} {:>5} {:>6.1} {} {} {:>4} {:>4} {:>4} {:>5}",
        row.name,
        row.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        row.grade,
        row.score,
        status,
        critical,
        row.high,
        row.medium,
        row.low,
        if row.has_sarif { "yes" } else { "-" },
    )
}
