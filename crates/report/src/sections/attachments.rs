use hmsnova_core::sja::Attachment;
use hmsnova_core::types::Rgb;

use crate::writer::{ReportWriter, BODY_SIZE};

/// Reference list of attachment links. Nothing is drawn when empty.
pub fn render_attachments(writer: &mut ReportWriter, attachments: &[Attachment]) {
    if attachments.is_empty() {
        return;
    }
    writer.heading("Attachments");
    for attachment in attachments {
        writer.bullet(&attachment_line(attachment), BODY_SIZE, 0.0, Rgb::BLACK);
    }
    writer.spacer(10.0);
}

fn attachment_line(attachment: &Attachment) -> String {
    match attachment.name.as_deref().filter(|n| !n.trim().is_empty()) {
        Some(name) => format!("{name}: {}", attachment.url),
        None => attachment.url.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_and_unnamed_attachments() {
        let named = Attachment {
            name: Some("Borekart.pdf".into()),
            url: "https://files.example.no/a/1".into(),
        };
        let unnamed = Attachment {
            name: None,
            url: "https://files.example.no/a/2".into(),
        };
        assert_eq!(attachment_line(&named), "Borekart.pdf: https://files.example.no/a/1");
        assert_eq!(attachment_line(&unnamed), "https://files.example.no/a/2");
    }
}
