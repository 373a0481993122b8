// ABOUTME: `ls` command: table of every managed instance with a short unique id prefix.
// ABOUTME: The SHORT column is the shortest prefix (4..=10) that still resolves uniquely.

use super::context::Context;
use ai_shell::error::Result;
use ai_shell::managed::{ManagedInstance, list_managed, unique_prefix_len};

const SHORT_MIN: usize = 4;
const SHORT_MAX: usize = 10;
const SHORT_UNKNOWN: &str = "??????????";

pub async fn ls(ctx: &Context) -> Result<()> {
    let runtime = ctx.connect().await?;
    let instances = list_managed(&runtime).await?;

    if ctx.output.is_json() {
        ctx.output.json(&instances)?;
        return Ok(());
    }

    if instances.is_empty() {
        ctx.output.line("No ai-shell managed containers found.");
        return Ok(());
    }

    for line in render_table(&instances) {
        println!("{line}");
    }
    Ok(())
}

fn short_ids(instances: &[ManagedInstance]) -> Vec<String> {
    let ids: Vec<&str> = instances
        .iter()
        .filter_map(|i| i.instance_id.as_deref())
        .collect();
    let len = unique_prefix_len(&ids, SHORT_MIN, SHORT_MAX);

    instances
        .iter()
        .map(|i| match (len, i.instance_id.as_deref()) {
            (n, Some(id)) if n > 0 => id
                .char_indices()
                .nth(n)
                .map_or(id, |(end, _)| &id[..end])
                .to_string(),
            _ => SHORT_UNKNOWN.to_string(),
        })
        .collect()
}

fn render_table(instances: &[ManagedInstance]) -> Vec<String> {
    let shorts = short_ids(instances);
    let rows: Vec<[&str; 5]> = instances
        .iter()
        .zip(&shorts)
        .map(|(i, short)| {
            [
                i.workdir_str(),
                short.as_str(),
                i.instance_id_str(),
                i.container.as_str(),
                i.status.as_str(),
            ]
        })
        .collect();

    let header = ["WORKDIR", "SHORT", "IID", "CONTAINER", "STATUS"];
    let mut widths = header.map(str::len);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    std::iter::once(header)
        .chain(rows)
        .map(|row| {
            let mut line = String::new();
            for (idx, cell) in row.iter().enumerate() {
                if idx + 1 == row.len() {
                    line.push_str(cell);
                } else {
                    line.push_str(&format!("{:<width$}  ", cell, width = widths[idx]));
                }
            }
            line
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ai_shell::types::ContainerName;

    fn instance(id: Option<&str>, container: &str, workdir: &str) -> ManagedInstance {
        ManagedInstance {
            workdir: Some(workdir.to_string()),
            instance_id: id.map(str::to_string),
            container: ContainerName::new(container),
            status: "running".to_string(),
            image: "ai-agent-shell".to_string(),
            volume: None,
        }
    }

    #[test]
    fn short_column_uses_unique_prefix() {
        let instances = vec![
            instance(Some("abcd111111"), "a", "/a"),
            instance(Some("abcd222222"), "b", "/b"),
        ];
        assert_eq!(short_ids(&instances), vec!["abcd1", "abcd2"]);
    }

    #[test]
    fn short_column_falls_back_when_no_prefix_works() {
        let instances = vec![
            instance(Some("aaaaaaaaaa"), "a", "/a"),
            instance(Some("aaaaaaaaaa"), "b", "/b"),
            instance(None, "c", "/c"),
        ];
        assert!(short_ids(&instances).iter().all(|s| s == SHORT_UNKNOWN));
    }

    #[test]
    fn table_columns_are_aligned() {
        let instances = vec![instance(Some("abcd111111"), "ai-agent-shell-abcd111111", "/w")];
        let lines = render_table(&instances);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("WORKDIR  SHORT  IID         CONTAINER"));
        assert!(lines[1].starts_with("/w       abcd   abcd111111  ai-agent-shell-abcd111111  running"));
    }
}
