//! Run parameters shared by all stages.

use crate::libs::align::{AlignMethod, AlignParams, EditCosts, DEFAULT_GAP_PENALTY};
use crate::libs::cluster::{Dbscan, DEFAULT_EPS, DEFAULT_MIN_POINTS};
use crate::libs::error::TracError;
use crate::libs::translate::WrapIncompleteCodon;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Gap penalty for alignment and similarity scoring, zero or negative
    pub gap: i32,
    /// DBSCAN minimum similarity
    pub eps: i32,
    pub min_points: usize,
    pub edit: EditCosts,
    pub wrap: WrapIncompleteCodon,
    /// Reading frames to translate, ascending
    pub frames: Vec<usize>,
    pub method: AlignMethod,
    pub parallel: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gap: DEFAULT_GAP_PENALTY,
            eps: DEFAULT_EPS,
            min_points: DEFAULT_MIN_POINTS,
            edit: EditCosts::default(),
            wrap: WrapIncompleteCodon::default(),
            frames: vec![0, 1, 2],
            method: AlignMethod::default(),
            parallel: 1,
        }
    }
}

impl Config {
    /// Rejects values that make alignment or clustering degenerate.
    pub fn validate(&self) -> Result<(), TracError> {
        AlignParams::new(self.gap)?;
        Dbscan::new(self.eps, self.min_points)?;
        EditCosts::new(self.edit.indel, self.edit.substitution)?;
        if self.frames.is_empty() {
            return Err(TracError::config("no reading frame selected"));
        }
        if let Some(f) = self.frames.iter().find(|&&f| f > 2) {
            return Err(TracError::config(format!(
                "reading frame must be 0, 1 or 2, got {}",
                f
            )));
        }
        if self.parallel == 0 {
            return Err(TracError::config("parallel must be at least 1"));
        }
        Ok(())
    }

    pub fn align_params(&self) -> AlignParams {
        AlignParams { gap: self.gap }
    }

    pub fn dbscan(&self) -> Dbscan {
        Dbscan {
            eps: self.eps,
            min_points: self.min_points,
        }
    }
}

/// Parses `all`, a single frame, or a comma-separated list such as `0,2`.
///
/// ```
/// use trac::libs::config::parse_frames;
/// assert_eq!(parse_frames("all").unwrap(), vec![0, 1, 2]);
/// assert_eq!(parse_frames("2,0,2").unwrap(), vec![0, 2]);
/// assert!(parse_frames("3").is_err());
/// ```
pub fn parse_frames(text: &str) -> Result<Vec<usize>, TracError> {
    if text == "all" {
        return Ok(vec![0, 1, 2]);
    }
    let mut frames = text
        .split(',')
        .map(|s| match s.trim().parse::<usize>() {
            Ok(f) if f <= 2 => Ok(f),
            _ => Err(TracError::config(format!("invalid reading frame {:?}", s))),
        })
        .collect::<Result<Vec<_>, _>>()?;
    frames.sort_unstable();
    frames.dedup();
    Ok(frames)
}
