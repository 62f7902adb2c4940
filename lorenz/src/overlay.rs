use std::{
    fmt::{Display, Formatter},
    io::Write,
};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    errors::LorenzErrors,
    simulation::Simulation,
    state::State,
    trajectory::{COLUMNS, Sample, Trajectory},
};

/// Name of the extra column carrying the system label.
pub const SYSTEM_COLUMN: &str = "system";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SystemLabel {
    A,
    B,
}

impl Display for SystemLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SystemLabel::A => write!(f, "A"),
            SystemLabel::B => write!(f, "B"),
        }
    }
}

/// A trajectory row tagged with the system it belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LabeledSample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub t: f64,
    pub system: SystemLabel,
}

/// Independently computed trajectories concatenated into one table for rendering.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MultiTrajectoryOverlay {
    runs: Vec<(SystemLabel, Trajectory)>,
}

impl MultiTrajectoryOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a run. Rows of earlier runs come first in the table.
    pub fn with(mut self, label: SystemLabel, trajectory: Trajectory) -> Self {
        self.runs.push((label, trajectory));
        self
    }

    pub fn get(&self, label: SystemLabel) -> Option<&Trajectory> {
        self.runs
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, traj)| traj)
    }

    pub fn labels(&self) -> impl Iterator<Item = SystemLabel> + '_ {
        self.runs.iter().map(|(l, _)| *l)
    }

    /// Total number of rows across all runs.
    pub fn len(&self) -> usize {
        self.runs.iter().map(|(_, traj)| traj.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn rows(&self) -> impl Iterator<Item = LabeledSample> + '_ {
        self.runs.iter().flat_map(|(label, traj)| {
            traj.iter().map(move |s: &Sample| LabeledSample {
                x: s.x,
                y: s.y,
                z: s.z,
                t: s.t,
                system: *label,
            })
        })
    }

    /// Column names of the combined table.
    pub fn columns() -> [&'static str; 5] {
        [COLUMNS[0], COLUMNS[1], COLUMNS[2], COLUMNS[3], SYSTEM_COLUMN]
    }

    /// Writes the combined table as CSV with an `x,y,z,t,system` header row.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), LorenzErrors> {
        let mut writer = csv::Writer::from_writer(writer);
        for row in self.rows() {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Runs system A from `initial_a` and, if given, system B from `initial_b`.
///
/// The two runs share `simulation` but are otherwise independent calls.
pub fn compare(
    simulation: &Simulation,
    initial_a: State,
    initial_b: Option<State>,
) -> Result<MultiTrajectoryOverlay, LorenzErrors> {
    info!(
        rho = simulation.params.rho,
        beta = simulation.params.beta,
        system_b = initial_b.is_some(),
        "comparison requested"
    );

    let mut overlay =
        MultiTrajectoryOverlay::new().with(SystemLabel::A, simulation.run(initial_a)?);
    if let Some(initial_b) = initial_b {
        overlay = overlay.with(SystemLabel::B, simulation.run(initial_b)?);
    }
    Ok(overlay)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parameters::SystemParameters, simulation::GridSpec};

    fn short_simulation() -> Simulation {
        Simulation::new(SystemParameters::default()).with_grid(GridSpec::new(0.01, 0.05))
    }

    #[test]
    fn test_compare_both_systems() {
        let sim = short_simulation();
        let overlay = compare(&sim, State::new(2.0, 1.0, 1.0), Some(State::INITIAL)).unwrap();

        assert_eq!(overlay.len(), 10);
        assert_eq!(overlay.labels().collect::<Vec<_>>(), vec![SystemLabel::A, SystemLabel::B]);

        let rows: Vec<LabeledSample> = overlay.rows().collect();
        assert!(rows[..5].iter().all(|r| r.system == SystemLabel::A));
        assert!(rows[5..].iter().all(|r| r.system == SystemLabel::B));
        assert_eq!((rows[0].x, rows[0].t), (2.0, 0.0));
        assert_eq!((rows[5].x, rows[5].t), (1.0, 0.0));

        // each constituent equals a standalone run
        assert_eq!(overlay.get(SystemLabel::B), Some(&sim.run(State::INITIAL).unwrap()));
    }

    #[test]
    fn test_compare_without_system_b() {
        let overlay = compare(&short_simulation(), State::INITIAL, None).unwrap();
        assert_eq!(overlay.len(), 5);
        assert!(overlay.get(SystemLabel::B).is_none());
    }

    #[test]
    fn test_compare_fails_if_either_run_fails() {
        let err = compare(
            &short_simulation(),
            State::INITIAL,
            Some(State::new(f64::NAN, 1.0, 1.0)),
        )
        .unwrap_err();
        assert!(matches!(err, LorenzErrors::InvalidParameter { name: "initial.x", .. }));
    }

    #[test]
    fn test_overlay_csv() {
        let overlay = compare(&short_simulation(), State::INITIAL, Some(State::INITIAL)).unwrap();
        let mut buffer = Vec::new();
        overlay.write_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], MultiTrajectoryOverlay::columns().join(","));
        assert_eq!(lines[1], "1.0,1.0,1.0,0.0,A");
        assert_eq!(lines[6], "1.0,1.0,1.0,0.0,B");
        assert_eq!(lines.len(), 11);
    }
}
