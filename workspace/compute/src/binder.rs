//! Per-session reactive binding between the two controls and the chart.
//!
//! A control change issues a [`BuildTicket`] and moves the binder from
//! `Idle` to `Updating`. The ticket's build result is handed back through
//! [`ReactiveBinder::complete`]; only the most recently issued ticket may
//! replace the displayed chart, so a slow build that finishes after a newer
//! one is discarded (last-write-wins). A failed build keeps the previous
//! chart on screen and records a notice.

use common::{ChartSpec, TimeRangeSelection, Zone};
use tracing::{debug, instrument, warn};

use crate::chart;
use crate::dataset::LoadTable;
use crate::error::{ChartError, Result};

/// Whether a build is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BinderState {
    #[default]
    Idle,
    Updating { generation: u64 },
}

/// The control values a chart was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub zone: Zone,
    pub range: TimeRangeSelection,
}

/// Handle for one in-flight build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildTicket {
    pub generation: u64,
    pub selection: Selection,
}

/// What the rendering layer should do after an event.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// Display this chart.
    Rendered { generation: u64, chart: ChartSpec },
    /// The build was overtaken by a newer event; show nothing new.
    Superseded { generation: u64, latest: u64 },
    /// Keep showing `retained` and surface `error` as a notice.
    Failed {
        generation: Option<u64>,
        error: ChartError,
        retained: Option<ChartSpec>,
    },
}

#[derive(Debug, Clone, Default)]
pub struct ReactiveBinder {
    state: BinderState,
    issued: u64,
    selection: Option<Selection>,
    displayed: Option<ChartSpec>,
    notice: Option<String>,
}

impl ReactiveBinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> BinderState {
        self.state
    }

    /// Last generation handed out by [`begin`](Self::begin).
    pub fn latest_generation(&self) -> u64 {
        self.issued
    }

    /// Selection of the chart currently displayed.
    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn displayed(&self) -> Option<&ChartSpec> {
        self.displayed.as_ref()
    }

    /// Message of the most recent failure, cleared by the next rendered chart.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Registers a control change and returns the ticket for its build.
    pub fn begin(&mut self, zone: Zone, range: TimeRangeSelection) -> BuildTicket {
        self.issued += 1;
        self.state = BinderState::Updating {
            generation: self.issued,
        };
        debug!(generation = self.issued, %zone, %range, "Build started");

        BuildTicket {
            generation: self.issued,
            selection: Selection { zone, range },
        }
    }

    /// Hands back the result of a ticket's build.
    #[instrument(skip_all, fields(generation = ticket.generation, latest = self.issued))]
    pub fn complete(&mut self, ticket: &BuildTicket, result: Result<ChartSpec>) -> UpdateOutcome {
        if ticket.generation != self.issued {
            warn!("Discarding stale build result");
            return UpdateOutcome::Superseded {
                generation: ticket.generation,
                latest: self.issued,
            };
        }

        self.state = BinderState::Idle;
        match result {
            Ok(chart) => {
                debug!("Rendering chart with {} points", chart.len());
                self.selection = Some(ticket.selection);
                self.displayed = Some(chart.clone());
                self.notice = None;
                UpdateOutcome::Rendered {
                    generation: ticket.generation,
                    chart,
                }
            }
            Err(error) => {
                warn!(%error, "Build failed, keeping previous chart");
                self.notice = Some(error.to_string());
                UpdateOutcome::Failed {
                    generation: Some(ticket.generation),
                    error,
                    retained: self.displayed.clone(),
                }
            }
        }
    }

    /// Ignores a control event whose values could not be accepted.
    ///
    /// No generation is issued, so an in-flight build is not superseded.
    pub fn reject(&mut self, error: ChartError) -> UpdateOutcome {
        warn!(%error, "Ignoring control event");
        self.notice = Some(error.to_string());
        UpdateOutcome::Failed {
            generation: None,
            error,
            retained: self.displayed.clone(),
        }
    }

    /// Runs one build synchronously: begin, build, complete.
    pub fn apply(&mut self, table: &LoadTable, zone: Zone, range: TimeRangeSelection) -> UpdateOutcome {
        let ticket = self.begin(zone, range);
        let chart = chart::build(table, zone, range);
        self.complete(&ticket, Ok(chart))
    }

    /// Like [`apply`](Self::apply) but for raw control values; invalid
    /// values are rejected without touching the displayed chart.
    pub fn apply_raw(
        &mut self,
        table: &LoadTable,
        zone: &str,
        start_index: usize,
        end_index: usize,
    ) -> UpdateOutcome {
        match chart::parse_selection(zone, start_index, end_index) {
            Ok((zone, range)) => self.apply(table, zone, range),
            Err(error) => self.reject(error),
        }
    }
}
