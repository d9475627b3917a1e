// Peregrine Assembler and SHIMMER Genome Assembly Toolkit
// 2019, 2020, 2021- (c) by Jason, Chen-Shan, Chin
//
// This Source Code Form is subject to the terms of the
// Creative Commons Attribution-NonCommercial-ShareAlike 4.0 International License.
//
// You should have received a copy of the license along with this
// work. If not, see <http://creativecommons.org/licenses/by-nc-sa/4.0/>.

#![allow(dead_code)]

pub mod best_overlap;
pub mod bog_runner;
pub mod chunk_graph;
pub mod error;
pub mod intersect;
pub mod layout;
pub mod mate_checker;
pub mod overlap;
pub mod read_catalog;
pub mod unitig;
pub mod unitig_graph;
#[cfg(test)]
pub mod test_utils;

pub use core::mem::MaybeUninit;
pub use libc::{getrusage, rusage, RUSAGE_SELF};

use error::BogError;
use std::str::FromStr;

/// How competing intersection break points on one unitig are thinned out
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BreakPolicy {
    /// drop breaks leaving too small a piece, keep the leftmost break of each cluster
    Spacing,
    /// keep big invaders, pick one small invader between them by fragment arrival rate
    Arrival,
}

impl FromStr for BreakPolicy {
    type Err = BogError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "spacing" => Ok(BreakPolicy::Spacing),
            "arrival" => Ok(BreakPolicy::Arrival),
            _ => Err(BogError::Config(format!("unknown break policy: {}", s))),
        }
    }
}

#[derive(Debug, Copy, Clone)]
pub struct BogParameters {
    // mismatch-rate cutoff on the corrected error rate
    pub erate: f64,
    // absolute number of mismatches allowed when erate fails, <= 0 disables it
    pub elimit: f64,
    // ceiling on the original error rate, anything above is never used
    pub max_orig_erate: f64,
    pub min_break_frags: u32,
    pub min_break_length: u32,
    pub break_policy: BreakPolicy,
    pub break_cluster_window: u32,
    pub bad_mate_stddev: f64,
    pub peak_threshold: i32,
    pub intersection_breaking: bool,
    pub mate_checking: bool,
    pub frg_count_target: u32,
}

impl Default for BogParameters {
    fn default() -> Self {
        BogParameters {
            erate: 0.015,
            elimit: 0.0,
            max_orig_erate: 0.06,
            min_break_frags: 1,
            min_break_length: 500,
            break_policy: BreakPolicy::Spacing,
            break_cluster_window: 50,
            bad_mate_stddev: 5.0,
            peak_threshold: -3,
            intersection_breaking: true,
            mate_checking: true,
            frg_count_target: 0,
        }
    }
}

impl BogParameters {
    pub fn validate(&self) -> Result<(), BogError> {
        if !(0.0..=1.0).contains(&self.erate) {
            return Err(BogError::Config(format!(
                "erate must be a fraction in [0, 1], got {}",
                self.erate
            )));
        }
        if !(0.0..=1.0).contains(&self.max_orig_erate) {
            return Err(BogError::Config(format!(
                "max_orig_erate must be a fraction in [0, 1], got {}",
                self.max_orig_erate
            )));
        }
        if self.erate > self.max_orig_erate {
            return Err(BogError::Config(format!(
                "erate {} is above the overlap error ceiling {}",
                self.erate, self.max_orig_erate
            )));
        }
        if !self.elimit.is_finite() {
            return Err(BogError::Config("elimit must be finite".to_string()));
        }
        if !(self.bad_mate_stddev > 0.0) {
            return Err(BogError::Config(format!(
                "bad_mate_stddev must be positive, got {}",
                self.bad_mate_stddev
            )));
        }
        if self.peak_threshold >= 0 {
            return Err(BogError::Config(format!(
                "peak_threshold must be negative, got {}",
                self.peak_threshold
            )));
        }
        Ok(())
    }
}

#[allow(dead_code)]
pub fn log_resource(msg: &str, data: &mut rusage) -> (u64, u64, u64) {
    let _res = unsafe { getrusage(RUSAGE_SELF, data) };
    log::info!(
        "{} : (maxRSS, utime, stime): {} {} {}",
        msg,
        data.ru_maxrss,
        data.ru_utime.tv_sec,
        data.ru_stime.tv_sec
    );

    (
        data.ru_maxrss as u64,
        data.ru_utime.tv_sec as u64,
        data.ru_stime.tv_sec as u64,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_parameters_are_valid() {
        assert!(BogParameters::default().validate().is_ok());
    }

    #[test]
    fn bad_parameters_are_rejected_up_front() {
        let mut p = BogParameters::default();
        p.erate = 0.2;
        assert!(matches!(p.validate(), Err(BogError::Config(_))));

        let mut p = BogParameters::default();
        p.peak_threshold = 0;
        assert!(matches!(p.validate(), Err(BogError::Config(_))));

        assert_eq!("Arrival".parse::<BreakPolicy>().unwrap(), BreakPolicy::Arrival);
        assert!("closest".parse::<BreakPolicy>().is_err());
    }
}
