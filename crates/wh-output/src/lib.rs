//! `wh-output` — output writers and render hints for the warehouse
//! simulation.
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | `csv`         | [`CsvWriter`]: `robot_snapshots.csv`, `tick_summaries.csv`    |
//! | `observer`    | [`SimOutputObserver`], drives any writer from the tick loop   |
//! | `portrayal`   | [`Portrayal`] shape/color hints for a grid visualizer         |
//! | `row`         | Plain row types                                               |
//! | `writer`      | The [`OutputWriter`] trait                                    |
//!
//! # Usage
//!
//! ```rust,ignore
//! use wh_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(100, &mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod portrayal;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use portrayal::{portray, Color, Portrayal, Shape};
pub use row::{RobotSnapshotRow, TickSummaryRow};
pub use writer::OutputWriter;
