use std::io::Write;

use lorenz_diffeq::saving::MemoryResult;
use serde::Serialize;

use crate::{errors::LorenzErrors, state::State};

/// Column names of a trajectory table, in order.
pub const COLUMNS: [&str; 4] = ["x", "y", "z", "t"];

/// One row of a trajectory table.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub t: f64,
}

impl Sample {
    pub fn state(&self) -> State {
        State::new(self.x, self.y, self.z)
    }
}

/// Time-ordered samples of a single Lorenz run, one per grid time.
///
/// A trajectory is only built by a completed integration and cannot be
/// modified afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    samples: Vec<Sample>,
}

impl Trajectory {
    pub(crate) fn from_result(result: MemoryResult<State>) -> Self {
        let samples = result
            .iter()
            .map(|(t, s)| Sample {
                x: s.x,
                y: s.y,
                z: s.z,
                t,
            })
            .collect();
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Values of the named column, `None` for names outside `COLUMNS`.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let get: fn(&Sample) -> f64 = match name {
            "x" => |s: &Sample| s.x,
            "y" => |s: &Sample| s.y,
            "z" => |s: &Sample| s.z,
            "t" => |s: &Sample| s.t,
            _ => return None,
        };
        Some(self.samples.iter().map(get).collect())
    }

    /// Euclidean distance between matching samples of two trajectories.
    ///
    /// Only the common prefix is compared when the lengths differ.
    pub fn separation(&self, other: &Trajectory) -> Vec<f64> {
        self.samples
            .iter()
            .zip(other.samples.iter())
            .map(|(a, b)| a.state().distance(&b.state()))
            .collect()
    }

    /// Time of the first sample whose separation from `other` exceeds `threshold`.
    pub fn separation_time(&self, other: &Trajectory, threshold: f64) -> Option<f64> {
        self.samples
            .iter()
            .zip(other.samples.iter())
            .find(|(a, b)| a.state().distance(&b.state()) > threshold)
            .map(|(a, _)| a.t)
    }

    /// Writes the table as CSV with an `x,y,z,t` header row.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), LorenzErrors> {
        let mut writer = csv::Writer::from_writer(writer);
        for sample in &self.samples {
            writer.serialize(sample)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trajectory(points: &[[f64; 4]]) -> Trajectory {
        Trajectory {
            samples: points
                .iter()
                .map(|p| Sample {
                    x: p[0],
                    y: p[1],
                    z: p[2],
                    t: p[3],
                })
                .collect(),
        }
    }

    #[test]
    fn test_columns() {
        let traj = trajectory(&[[1.0, 2.0, 3.0, 0.0], [4.0, 5.0, 6.0, 0.5]]);
        assert_eq!(traj.column("x"), Some(vec![1.0, 4.0]));
        assert_eq!(traj.column("y"), Some(vec![2.0, 5.0]));
        assert_eq!(traj.column("z"), Some(vec![3.0, 6.0]));
        assert_eq!(traj.column("t"), Some(vec![0.0, 0.5]));
        assert_eq!(traj.column("initial"), None);
    }

    #[test]
    fn test_csv_header_and_rows() {
        let traj = trajectory(&[[1.0, 1.0, 1.0, 0.0], [1.5, -2.0, 0.25, 0.01]]);
        let mut buffer = Vec::new();
        traj.write_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], COLUMNS.join(","));
        assert_eq!(lines[1], "1.0,1.0,1.0,0.0");
        assert_eq!(lines[2], "1.5,-2.0,0.25,0.01");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_separation() {
        let a = trajectory(&[[0.0, 0.0, 0.0, 0.0], [0.0, 0.0, 0.0, 1.0], [0.0, 0.0, 0.0, 2.0]]);
        let b = trajectory(&[[0.0, 0.0, 0.0, 0.0], [3.0, 4.0, 0.0, 1.0]]);
        assert_eq!(a.separation(&b), vec![0.0, 5.0]);
        assert_eq!(a.separation_time(&b, 1.0), Some(1.0));
        assert_eq!(a.separation_time(&b, 10.0), None);
    }
}
