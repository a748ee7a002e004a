/// Escapes one CSV field. Missing values render as `-`; a field
/// containing a comma, quote, or newline is wrapped in quotes with
/// embedded quotes doubled.
fn escape(field: Option<&str>) -> String {
    let value = match field {
        Some(v) => v,
        None => "-",
    };
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Renders a header row plus one line per record, `\n` separated.
pub fn render<I>(headers: &[&str], rows: I) -> String
where
    I: IntoIterator<Item = Vec<Option<String>>>,
{
    let mut out = headers.join(",");
    for row in rows {
        out.push('\n');
        let line: Vec<String> = row.iter().map(|f| escape(f.as_deref())).collect();
        out.push_str(&line.join(","));
    }
    out
}
