use colored::Colorize;

use crate::controller::Snapshot;

/// Renders the snapshot as a terminal table with a pagination footer, the
/// shape the backing web view presents.
pub fn render_table(snapshot: &Snapshot) -> String {
    let mut out = String::new();

    let headers = ["Title", "Genre", "Release Date", "Rating"];
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    let rows: Vec<[String; 4]> = snapshot
        .view
        .iter()
        .map(|m| {
            [
                m.title.clone(),
                m.genre.clone(),
                m.release_date.format("%Y-%m-%d").to_string(),
                format!("{:.1}", m.rating),
            ]
        })
        .collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    for (i, header) in headers.iter().enumerate() {
        let padded = format!("{:<width$}", header, width = widths[i]);
        out.push_str(&format!("{}  ", padded.bold()));
    }
    out.push('\n');
    for width in &widths {
        out.push_str(&"-".repeat(*width));
        out.push_str("  ");
    }
    out.push('\n');

    if rows.is_empty() {
        out.push_str("No movies match the current filters.\n");
    } else {
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                out.push_str(&format!("{:<width$}  ", cell, width = widths[i]));
            }
            out.push('\n');
        }
    }

    out.push('\n');
    out.push_str(&format!(
        "Page {} of {}\n",
        snapshot.page.current_page, snapshot.page.total_pages
    ));

    if !snapshot.criteria.is_empty() {
        let mut active: Vec<String> = Vec::new();
        if !snapshot.criteria.query.is_empty() {
            active.push(format!("query={}", snapshot.criteria.query));
        }
        if !snapshot.criteria.genre.is_empty() {
            active.push(format!("genre={}", snapshot.criteria.genre));
        }
        if !snapshot.criteria.min_release_date.is_empty() {
            active.push(format!("min-date={}", snapshot.criteria.min_release_date));
        }
        if !snapshot.criteria.min_rating.is_empty() {
            active.push(format!("min-rating={}", snapshot.criteria.min_rating));
        }
        out.push_str(&format!("Filters: {}\n", active.join(", ")));
    }

    if let Some(err) = &snapshot.last_error {
        out.push_str(&format!(
            "{}{}{} {}\n",
            "[".bold().white(),
            "ERR".bold().red(),
            "]".bold().white(),
            err
        ));
    }

    out
}

pub fn render_json(snapshot: &Snapshot) -> Vec<u8> {
    let value = serde_json::json!({
        "view": snapshot.view,
        "page": {
            "current_page": snapshot.page.current_page,
            "total_pages": snapshot.page.total_pages,
            "sort": snapshot.page.sort.as_param(),
        },
        "criteria": {
            "query": snapshot.criteria.query,
            "genre": snapshot.criteria.genre,
            "min_release_date": snapshot.criteria.min_release_date,
            "min_rating": snapshot.criteria.min_rating,
        },
        "genre_options": snapshot.genre_options,
        "last_error": snapshot.last_error.as_ref().map(|e| e.to_string()),
    });
    serde_json::to_vec_pretty(&value).unwrap_or_else(|_| b"{}\n".to_vec())
}
