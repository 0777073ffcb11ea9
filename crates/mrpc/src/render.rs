//! Terminal rendering of the gallery and notifications.

use mrpc_core::models::{Notification, Severity};
use mrpc_core::{IconRecord, MrpcState};

/// Render the gallery as a table with one icon per line.
pub fn gallery(state: &MrpcState) -> String {
    let icons = state.icons();
    gallery_table(&icons, |icon| state.icon_url(icon))
}

fn gallery_table(icons: &[IconRecord], url: impl Fn(&IconRecord) -> String) -> String {
    if icons.is_empty() {
        return "No icons.\n".to_string();
    }

    let name_width = icons.iter().map(|i| i.name.chars().count()).max().unwrap_or(0).max(4);
    let id_width = icons.iter().map(|i| i.id.len()).max().unwrap_or(0).max(2);

    let mut out = format!("{:<name_width$}  {:<id_width$}  IMAGE\n", "NAME", "ID");
    for icon in icons {
        out.push_str(&format!(
            "{:<name_width$}  {:<id_width$}  {}\n",
            icon.name,
            icon.id,
            url(icon)
        ));
    }
    out.push_str(&format!("{} icon(s)\n", icons.len()));
    out
}

/// One-line form of a notification.
pub fn notification_line(notification: &Notification) -> String {
    let marker = match notification.severity {
        Severity::Success => "✔",
        Severity::Error => "✖",
        Severity::Info => "ℹ",
    };
    format!("{marker} {}: {}", notification.title, notification.message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_gallery() {
        assert_eq!(gallery_table(&[], |_| String::new()), "No icons.\n");
    }

    #[test]
    fn test_gallery_table() {
        let icons = vec![
            IconRecord::new("abc123", "Logo", Some("1")),
            IconRecord::new("9", "my_icon_v2", Some("1")),
        ];
        let out = gallery_table(&icons, |icon| format!("cdn/{}.png", icon.id));
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "NAME        ID      IMAGE");
        assert_eq!(lines[1], "Logo        abc123  cdn/abc123.png");
        assert_eq!(lines[2], "my_icon_v2  9       cdn/9.png");
        assert_eq!(lines[3], "2 icon(s)");
    }

    #[test]
    fn test_notification_line() {
        assert_eq!(notification_line(&Notification::upload_succeeded()), "✔ Success: Upload success");
        assert_eq!(
            notification_line(&Notification::upload_failed()),
            "✖ Error: Error uploading icon"
        );
    }
}
