//! Risk assessment and mitigation blocks.

use hmsnova_core::sja::{MitigationAction, RiskItem};
use hmsnova_core::types::Rgb;

use super::format_date;
use crate::writer::{ReportWriter, BODY_SIZE, DETAIL_INDENT, SUBHEADING_SIZE};

/// Numbered risks with score, consequence and their own mitigations.
pub fn render_risks(writer: &mut ReportWriter, risks: &[RiskItem]) {
    writer.heading("Risk Assessment");

    if risks.is_empty() {
        writer.draw_text("No risks registered", BODY_SIZE, false, 0.0, Rgb::GRAY);
        writer.spacer(10.0);
        return;
    }

    for (idx, risk) in risks.iter().enumerate() {
        let title = risk_title(idx + 1, risk);
        let title_lines = writer.wrap_lines(&title, SUBHEADING_SIZE, true, 0.0);
        let group = ReportWriter::block_height(title_lines.len(), SUBHEADING_SIZE)
            + ReportWriter::block_height(1, BODY_SIZE);
        writer.ensure_space(group);

        for line in &title_lines {
            writer.draw_text(line, SUBHEADING_SIZE, true, 0.0, Rgb::BLACK);
        }
        let level = risk.level();
        writer.draw_text(&score_line(risk), BODY_SIZE, true, DETAIL_INDENT, level.color());

        if let Some(consequence) = risk.consequence.as_deref().filter(|c| !c.trim().is_empty()) {
            writer.keep_together(
                &format!("Consequence: {consequence}"),
                BODY_SIZE,
                false,
                DETAIL_INDENT,
                Rgb::BLACK,
            );
        }

        for action in &risk.actions {
            writer.bullet(&action_bullet(action), BODY_SIZE, DETAIL_INDENT, Rgb::BLACK);
        }
        writer.spacer(8.0);
    }
}

/// Mitigations not attached to any risk. Nothing is drawn when empty.
pub fn render_general_actions(writer: &mut ReportWriter, actions: &[MitigationAction]) {
    if actions.is_empty() {
        return;
    }
    writer.heading("General Mitigation Actions");
    for action in actions {
        writer.bullet(&action_bullet(action), BODY_SIZE, 0.0, Rgb::BLACK);
    }
    writer.spacer(10.0);
}

fn risk_title(number: usize, risk: &RiskItem) -> String {
    format!("{number}. {}: {}", risk.activity, risk.hazard)
}

fn score_line(risk: &RiskItem) -> String {
    format!("Risk score: {} ({})", risk.score(), risk.level().label())
}

/// Bullet text for a mitigation, without the bullet glyph. Absent parts
/// are left out of the parenthesis, which is dropped entirely when empty.
pub fn action_bullet(action: &MitigationAction) -> String {
    let mut parts = Vec::new();
    if let Some(responsible) = action.responsible.as_deref().filter(|r| !r.is_empty()) {
        parts.push(format!("Responsible: {responsible}"));
    }
    if let Some(status) = action.status.as_deref().filter(|s| !s.is_empty()) {
        parts.push(format!("Status: {status}"));
    }
    if let Some(due) = action.due_date {
        parts.push(format!("Due: {}", format_date(due)));
    }

    if parts.is_empty() {
        action.description.clone()
    } else {
        format!("{} ({})", action.description, parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn action() -> MitigationAction {
        MitigationAction {
            description: "Bruk P3 støvmaske".into(),
            responsible: Some("Ola Hansen".into()),
            status: Some("OPEN".into()),
            due_date: NaiveDate::from_ymd_opt(2026, 3, 15),
            risk_id: Some(1),
        }
    }

    #[test]
    fn full_action_bullet() {
        assert_eq!(
            action_bullet(&action()),
            "Bruk P3 støvmaske (Responsible: Ola Hansen, Status: OPEN, Due: 15.03.2026)"
        );
    }

    #[test]
    fn partial_action_bullet_omits_missing_parts() {
        let mut a = action();
        a.responsible = None;
        a.due_date = None;
        assert_eq!(action_bullet(&a), "Bruk P3 støvmaske (Status: OPEN)");

        a.status = None;
        assert_eq!(action_bullet(&a), "Bruk P3 støvmaske");
    }

    #[test]
    fn title_and_score_lines() {
        let risk = RiskItem {
            id: Some(1),
            activity: "Boring".into(),
            hazard: "Silikastøv".into(),
            consequence: None,
            probability: Some(4),
            severity: Some(5),
            stored_score: None,
            actions: vec![],
        };
        assert_eq!(risk_title(1, &risk), "1. Boring: Silikastøv");
        assert_eq!(score_line(&risk), "Risk score: 20 (High)");
    }
}
