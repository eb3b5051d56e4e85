//! Interval clustering and greedy column assignment.
//!
//! Operates on events already filtered to one calendar day with
//! `all_day = false`. Events are swept in (start asc, end desc) order into
//! clusters of transitively overlapping events; within each cluster every
//! event gets the lowest-indexed free lane, and all members share the same
//! `max_column_index`.

use chrono::{DateTime, Local};

use crate::models::event::Event;

/// Assign `column_index` / `max_column_index` for one day's timed events.
///
/// The slice is treated as one day-group; order of the slice itself is
/// preserved (layout is written back through a sorted index view, ties
/// beyond (start, end) stay input-order-stable).
pub fn layout_day(events: &mut [Event]) {
    let members: Vec<usize> = (0..events.len()).collect();
    layout_day_subset(events, &members);
}

/// Same as [`layout_day`] but restricted to the events at `members`,
/// so callers can lay out a day-group inside a larger collection without
/// moving events around.
pub(crate) fn layout_day_subset(events: &mut [Event], members: &[usize]) {
    if members.is_empty() {
        return;
    }

    let mut order: Vec<usize> = members.to_vec();
    // Longer events that start together take the earlier lane.
    order.sort_by(|&a, &b| {
        events[a]
            .start
            .cmp(&events[b].start)
            .then_with(|| events[b].end.cmp(&events[a].end))
    });

    let mut clusters: Vec<Vec<usize>> = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut cluster_end: Option<DateTime<Local>> = None;

    for &idx in &order {
        match cluster_end {
            None => {
                current.push(idx);
                cluster_end = Some(events[idx].end);
            }
            Some(end) => {
                // Strict `<`: touching intervals (end == next start) do
                // not overlap and may share a lane.
                if events[idx].start < end {
                    current.push(idx);
                    if events[idx].end > end {
                        cluster_end = Some(events[idx].end);
                    }
                } else {
                    clusters.push(std::mem::take(&mut current));
                    current.push(idx);
                    cluster_end = Some(events[idx].end);
                }
            }
        }
    }
    if !current.is_empty() {
        clusters.push(current);
    }

    for cluster in &clusters {
        assign_columns(events, cluster);
    }
}

/// Greedy first-fit lane assignment inside one cluster.
/// Optimal for interval graphs: lane count equals the clique number.
fn assign_columns(events: &mut [Event], cluster: &[usize]) {
    let mut column_ends: Vec<DateTime<Local>> = Vec::new();

    for &idx in cluster {
        let start = events[idx].start;
        let end = events[idx].end;

        let column = match column_ends.iter().position(|col_end| *col_end <= start) {
            Some(col) => {
                column_ends[col] = end;
                col
            }
            None => {
                column_ends.push(end);
                column_ends.len() - 1
            }
        };
        events[idx].column_index = column;
    }

    let max_column = column_ends.len() - 1;
    for &idx in cluster {
        events[idx].max_column_index = max_column;
    }
}
