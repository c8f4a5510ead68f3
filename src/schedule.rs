use chrono::{Duration, NaiveTime};
use unicode_width::UnicodeWidthStr;

use crate::sequence::{total_secs, Phase, PhaseKind};
use crate::util::format_duration;

/// one printable row of the session plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRow {
    pub starts_at: NaiveTime,
    pub kind: PhaseKind,
    pub block: String,
    pub activity: String,
    pub duration_secs: u32,
}

/// project a built sequence onto the wall clock, one row per phase
pub fn project(sequence: &[Phase], start: NaiveTime) -> Vec<ScheduleRow> {
    let mut cursor = start;
    let mut rows = Vec::with_capacity(sequence.len());

    for phase in sequence {
        rows.push(ScheduleRow {
            starts_at: cursor,
            kind: phase.kind,
            block: block_label(phase),
            activity: phase.label.clone(),
            duration_secs: phase.duration_secs,
        });
        cursor += Duration::seconds(i64::from(phase.duration_secs));
    }

    rows
}

/// the wall-clock moment the session ends when begun at `start`
pub fn finish_time(sequence: &[Phase], start: NaiveTime) -> NaiveTime {
    start + Duration::seconds(i64::from(total_secs(sequence)))
}

/// plain-text plan table for non-interactive output
pub fn render_table(sequence: &[Phase], start: NaiveTime) -> String {
    let rows = project(sequence, start);

    let block_width = column_width("BLOCK", rows.iter().map(|r| r.block.as_str()));
    let activity_width = column_width("ACTIVITY", rows.iter().map(|r| r.activity.as_str()));

    let mut out = String::new();
    out.push_str(&format!(
        "TIME      {}  {}  DURATION\n",
        pad_to("BLOCK", block_width),
        pad_to("ACTIVITY", activity_width),
    ));

    for row in &rows {
        out.push_str(&format!(
            "{}  {}  {}  {}\n",
            row.starts_at.format("%H:%M:%S"),
            pad_to(&row.block, block_width),
            pad_to(&row.activity, activity_width),
            format_duration(row.duration_secs),
        ));
    }

    out.push_str(&format!(
        "\nends at {}  (total {})\n",
        finish_time(sequence, start).format("%H:%M:%S"),
        format_duration(total_secs(sequence)),
    ));

    out
}

fn block_label(phase: &Phase) -> String {
    match (phase.kind, phase.round) {
        (PhaseKind::Work | PhaseKind::Rest, Some(round)) => format!("Circuit {}", round),
        _ => phase.kind.as_str().to_string(),
    }
}

fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(|v| v.width())
        .chain(std::iter::once(header.width()))
        .max()
        .unwrap_or(0)
}

/// pad with spaces to a display width, not a char count
fn pad_to(text: &str, width: usize) -> String {
    let mut padded = text.to_string();
    for _ in text.width()..width {
        padded.push(' ');
    }
    padded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::SequenceBuilder;
    use crate::session::{SessionConfig, WarmUpStep};

    fn sample_sequence() -> Vec<Phase> {
        let config = SessionConfig {
            exercises: vec!["Squats".to_string(), "Push-Ups".to_string()],
            work_secs: 45,
            rest_secs: 90,
            rounds: 2,
            warm_up: vec![
                WarmUpStep::new("Joint Mobility", 120),
                WarmUpStep::new("Jumping Jacks", 60),
            ],
            cool_down_secs: 300,
        };
        SequenceBuilder::new(config).build().unwrap()
    }

    fn seven_am() -> NaiveTime {
        NaiveTime::from_hms_opt(7, 0, 0).unwrap()
    }

    #[test]
    fn test_project_row_per_phase() {
        let sequence = sample_sequence();
        let rows = project(&sequence, seven_am());
        assert_eq!(rows.len(), sequence.len());
    }

    #[test]
    fn test_project_offsets_accumulate() {
        let sequence = sample_sequence();
        let rows = project(&sequence, seven_am());

        assert_eq!(rows[0].starts_at, seven_am());
        // second warm-up step starts after the 120s first step
        assert_eq!(rows[1].starts_at, NaiveTime::from_hms_opt(7, 2, 0).unwrap());
        // first work phase starts a minute later
        assert_eq!(rows[2].starts_at, NaiveTime::from_hms_opt(7, 3, 0).unwrap());

        for pair in rows.windows(2) {
            let expected = pair[0].starts_at + Duration::seconds(i64::from(pair[0].duration_secs));
            assert_eq!(pair[1].starts_at, expected);
        }
    }

    #[test]
    fn test_block_labels_group_rounds() {
        let sequence = sample_sequence();
        let rows = project(&sequence, seven_am());

        assert_eq!(rows[0].block, "Warm-Up");
        assert_eq!(rows[0].kind, PhaseKind::WarmUp);
        assert_eq!(rows[2].block, "Circuit 1");
        assert!(rows.iter().any(|r| r.block == "Circuit 2"));
        assert_eq!(rows.last().unwrap().block, "Cool-Down");
        assert_eq!(rows.last().unwrap().kind, PhaseKind::CoolDown);
    }

    #[test]
    fn test_finish_time_matches_total() {
        let sequence = sample_sequence();
        // 180 warm-up + 4x45 work + 3x90 rest + 300 cool-down = 930s
        assert_eq!(total_secs(&sequence), 930);
        assert_eq!(
            finish_time(&sequence, seven_am()),
            NaiveTime::from_hms_opt(7, 15, 30).unwrap()
        );
    }

    #[test]
    fn test_finish_time_wraps_past_midnight() {
        let sequence = sample_sequence();
        let late = NaiveTime::from_hms_opt(23, 55, 0).unwrap();
        assert_eq!(
            finish_time(&sequence, late),
            NaiveTime::from_hms_opt(0, 10, 30).unwrap()
        );
    }

    #[test]
    fn test_render_table_lists_every_phase() {
        let sequence = sample_sequence();
        let table = render_table(&sequence, seven_am());

        assert!(table.starts_with("TIME"));
        assert!(table.contains("07:00:00"));
        assert!(table.contains("Joint Mobility"));
        assert!(table.contains("Squats"));
        assert!(table.contains("Circuit 2"));
        assert!(table.contains("Stretching"));
        assert!(table.contains("ends at 07:15:30"));
        assert!(table.contains("total 15 min 30 sec"));

        // header plus one line per phase, a blank, and the footer
        assert_eq!(table.lines().count(), 1 + sequence.len() + 2);
    }

    #[test]
    fn test_render_table_columns_align() {
        let sequence = sample_sequence();
        let table = render_table(&sequence, seven_am());

        let mut lines = table.lines();
        let header = lines.next().unwrap();
        let column = header.find("ACTIVITY").unwrap();

        // sample content is ASCII, so byte offsets are display columns
        let first_row = lines.next().unwrap();
        assert_eq!(&first_row[column..column + 14], "Joint Mobility");

        let rest_row = table.lines().find(|l| l.contains("Rest")).unwrap();
        assert_eq!(&rest_row[column..column + 4], "Rest");
    }

    #[test]
    fn test_pad_to_uses_display_width() {
        assert_eq!(pad_to("ab", 4), "ab  ");
        assert_eq!(pad_to("abcd", 4), "abcd");
        // already wider than the target: left untouched
        assert_eq!(pad_to("abcdef", 4), "abcdef");
    }
}
