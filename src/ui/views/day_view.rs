use std::fmt::Write;

use chrono::NaiveTime;

use crate::models::event::EventKind;
use crate::services::day_timeline::{current_time_offset, DayTimeline, TimelineBlock, MINUTES_PER_HOUR};
use crate::utils::date::{format_hm, selected_date_label};

fn block_label(block: &TimelineBlock) -> String {
    let marker = match block.event.kind {
        EventKind::GoogleSynced => " 📅",
        EventKind::Schedule | EventKind::Record => "",
    };
    let size = if block.is_compact { "·" } else { "█" };
    format!(
        "{} {}{} ({})",
        size,
        block.event.title,
        marker,
        block.time_range_label()
    )
}

fn blocks_in_hour(lane: &[TimelineBlock], hour: i64) -> Vec<String> {
    lane.iter()
        .filter(|block| block.top_offset_minutes.div_euclid(MINUTES_PER_HOUR) == hour)
        .map(block_label)
        .collect()
}

/// One text row per hour label; blocks are listed in the row of the hour
/// they start in.
pub fn render_timeline(
    out: &mut String,
    timeline: &DayTimeline,
    show_record_lane: bool,
    now: Option<NaiveTime>,
) {
    let _ = writeln!(out, "{}", selected_date_label(timeline.date));
    let now_offset = now.map(current_time_offset);

    for (hour, label) in timeline.hour_labels.iter().enumerate() {
        let hour = hour as i64;
        let schedules = blocks_in_hour(&timeline.schedule_lane, hour);
        let _ = write!(out, "{} │ {}", label, schedules.join(" "));
        if show_record_lane {
            let records = blocks_in_hour(&timeline.record_lane, hour);
            if !records.is_empty() {
                let _ = write!(out, " ┃ {}", records.join(" "));
            }
        }
        let _ = writeln!(out);

        if let Some(offset) = now_offset {
            if offset.div_euclid(MINUTES_PER_HOUR) == hour {
                let minute = offset.rem_euclid(MINUTES_PER_HOUR) as u32;
                let _ = writeln!(out, "──── now {}", format_hm(hour as u32, minute));
            }
        }
    }
}
