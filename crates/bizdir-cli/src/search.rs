/// Print businesses matching the search, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub(crate) async fn run_search(
    pool: &sqlx::PgPool,
    search: bizdir_db::BusinessSearch,
) -> anyhow::Result<()> {
    let rows = bizdir_db::search_businesses(pool, &search).await?;

    if rows.is_empty() {
        println!("no businesses found; run `ingest` first");
        return Ok(());
    }

    println!("{:<32}{:<14}{:<18}{:<8}ADDRESS", "NAME", "CITY", "CATEGORY", "RATING");
    for row in &rows {
        let rating = row
            .rating
            .map_or_else(|| "-".to_string(), |r| format!("{r:.1}"));
        println!(
            "{:<32}{:<14}{:<18}{:<8}{}",
            truncate(&row.name, 30),
            truncate(&row.city, 12),
            truncate(&row.category, 16),
            rating,
            row.address.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}

fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() > max_chars {
        format!("{}...", value.chars().take(max_chars - 3).collect::<String>())
    } else {
        value.to_string()
    }
}
