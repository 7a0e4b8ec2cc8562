use std::fmt::Write;

use crate::services::detail::EventDetail;

pub fn render_detail(out: &mut String, detail: &EventDetail) {
    match detail {
        EventDetail::Schedule(schedule) => {
            let _ = writeln!(out, "{}", schedule.title);
            let _ = writeln!(out, "  日付: {}", schedule.date);
            let _ = writeln!(out, "  時間: {}", schedule.time_range);
            let _ = writeln!(out, "  タスク: {}", schedule.task);
            let _ = writeln!(out, "  メモ: {}", schedule.memo);
            if let Some(target) = schedule.edit_target() {
                let _ = writeln!(out, "  編集: {}", target);
            }
            if schedule.can_delete {
                let _ = writeln!(out, "  削除: delete {}", schedule.id);
            }
            if let Some(note) = schedule.sync_note {
                let _ = writeln!(out, "  ※ {}", note);
            }
        }
        EventDetail::Record(record) => {
            let _ = writeln!(out, "記録");
            let _ = writeln!(out, "  日付: {}", record.date);
            let _ = writeln!(out, "  時間: {}", record.time_range);
            let _ = writeln!(out, "  タスク: {}", record.task);
            let _ = writeln!(out, "  メモ: {}", record.memo);
        }
    }
}
