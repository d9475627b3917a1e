// Peregrine Assembler and SHIMMER Genome Assembly Toolkit
// 2019, 2020, 2021- (c) by Jason, Chen-Shan, Chin
//
// This Source Code Form is subject to the terms of the
// Creative Commons Attribution-NonCommercial-ShareAlike 4.0 International License.
//
// You should have received a copy of the license along with this
// work. If not, see <http://creativecommons.org/licenses/by-nc-sa/4.0/>.

#![allow(dead_code)]

//
// mate pair consistency: library insert sizes, coverage of unhappy mates, and
// the unitig breaks they call for
//

use super::best_overlap::ReadEnd;
use super::error::BogError;
use super::intersect::{carried_by_path_reads, make_candidates, select_breaks};
use super::read_catalog::ReadCatalog;
use super::unitig::{SeqInterval, Unitig};
use super::unitig_graph::{BreakPoint, UnitigGraph};
use super::BogParameters;
use rustc_hash::FxHashMap;

pub const MATE_BREAK_IN_SIZE: i32 = 100_000;
pub const MATE_BREAK_IN_FRAGS: u32 = 10;

/// Running mean and spread of mate distances.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct DistanceCompute {
    n: u64,
    mean: f64,
    m2: f64,
}

impl DistanceCompute {
    pub fn new() -> Self {
        DistanceCompute::default()
    }

    pub fn from_values(values: &[i32]) -> Self {
        let mut dc = DistanceCompute::new();
        for &v in values {
            dc.push(v as f64);
        }
        dc
    }

    pub fn push(&mut self, x: f64) {
        self.n += 1;
        let delta = x - self.mean;
        self.mean += delta / self.n as f64;
        self.m2 += delta * (x - self.mean);
    }

    pub fn merge(&mut self, other: &DistanceCompute) {
        if other.n == 0 {
            return;
        }
        if self.n == 0 {
            *self = *other;
            return;
        }
        let (a, b) = (self.n as f64, other.n as f64);
        let n = a + b;
        let delta = other.mean - self.mean;
        self.mean += delta * b / n;
        self.m2 += other.m2 + delta * delta * a * b / n;
        self.n += other.n;
    }

    #[inline]
    pub fn num_pairs(&self) -> u64 {
        self.n
    }

    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn stddev(&self) -> f64 {
        if self.n <= 1 {
            0.0
        } else {
            (self.m2 / (self.n - 1) as f64).sqrt()
        }
    }
}

pub type LibraryStats = FxHashMap<u32, DistanceCompute>;

/// Sort `dists` and recompute the statistics over the values near the median.
pub fn robust_stats(dists: &mut Vec<i32>) -> Option<DistanceCompute> {
    if dists.is_empty() {
        return None;
    }
    dists.sort_unstable();
    let n = dists.len();
    let median = dists[n / 2];
    let third = dists[n / 3];
    let two_third = dists[n * 2 / 3];
    let approx_std = (median - third).max(two_third - median);
    let smallest = median - 5 * approx_std;
    let biggest = median + 5 * approx_std;

    let kept: Vec<i32> = dists
        .iter()
        .copied()
        .filter(|&d| d >= smallest && d <= biggest)
        .collect();
    let dc = DistanceCompute::from_values(&kept);
    log::info!(
        "distances: {} median {} 1/3rd {} 2/3rd {} approx std {} range {}..{} kept {} mean {:.1} stddev {:.1}",
        n,
        median,
        third,
        two_third,
        approx_std,
        smallest,
        biggest,
        dc.num_pairs(),
        dc.mean(),
        dc.stddev()
    );
    if dc.num_pairs() == 0 {
        None
    } else {
        Some(dc)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MateClass {
    Good,
    Bad,
}

/// Both reads of a pair as seen from one unitig; the second is absent when the
/// mate lies elsewhere.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MateLocationEntry {
    pub id1: u32,
    pub pos1: SeqInterval,
    pub on_path1: bool,
    pub id2: Option<u32>,
    pub pos2: SeqInterval,
    pub lib: u32,
    pub is_bad: bool,
}

#[derive(Debug, Copy, Clone)]
pub struct MateBounds {
    pub bad_min: i32,
    pub bad_max: i32,
}

impl MateBounds {
    pub fn new(stats: &DistanceCompute, bad_mate_stddev: f64) -> Self {
        MateBounds {
            bad_min: (stats.mean() - bad_mate_stddev * stats.stddev()) as i32,
            bad_max: (stats.mean() + bad_mate_stddev * stats.stddev()) as i32,
        }
    }
}

pub fn classify_pair(
    entry: &MateLocationEntry,
    stats: &DistanceCompute,
    params: &BogParameters,
    tig_len: i32,
) -> MateClass {
    let b = MateBounds::new(stats, params.bad_mate_stddev);
    let p1 = entry.pos1;
    let bad = match entry.id2 {
        None => {
            if p1.is_reverse() {
                p1.bgn > b.bad_max
            } else {
                p1.bgn + b.bad_max < tig_len
            }
        }
        Some(_) => {
            let p2 = entry.pos2;
            if p1.is_reverse() || !p2.is_reverse() {
                true
            } else {
                let dist = p2.bgn - p1.bgn;
                dist < b.bad_min || dist > b.bad_max
            }
        }
    };
    if bad {
        MateClass::Bad
    } else {
        MateClass::Good
    }
}

pub struct MateLocation {
    table: Vec<MateLocationEntry>,
}

impl MateLocation {
    /// One entry per pair with a read in `utg`, sorted by the left read.
    pub fn build(utg: &Unitig, catalog: &ReadCatalog) -> Self {
        let mut table = Vec::<MateLocationEntry>::new();
        let mut index = FxHashMap::<u32, usize>::default();
        for n in utg.placed_reads() {
            let mate = match catalog.mate_id(n.ident) {
                Some(m) => m,
                None => continue,
            };
            if let Some(&i) = index.get(&mate) {
                table[i].id2 = Some(n.ident);
                table[i].pos2 = n.position;
                index.insert(n.ident, i);
            } else if !index.contains_key(&n.ident) {
                index.insert(n.ident, table.len());
                table.push(MateLocationEntry {
                    id1: n.ident,
                    pos1: n.position,
                    on_path1: n.contained.is_none(),
                    id2: None,
                    pos2: SeqInterval::default(),
                    lib: catalog.library_id(n.ident),
                    is_bad: false,
                });
            }
        }
        table.sort_by_key(|e| (e.pos1.min(), e.id1));
        MateLocation { table }
    }

    pub fn entries(&self) -> &[MateLocationEntry] {
        &self.table
    }
}

pub struct MateCoverage {
    pub good: Vec<i32>,
    pub bad_fwd: Vec<i32>,
    pub bad_rev: Vec<i32>,
    pub table: MateLocation,
}

#[inline]
fn incr_range(graph: &mut [i32], val: i32, bgn: i32, end: i32) {
    let len = graph.len() as i32;
    if len == 0 {
        return;
    }
    let bgn = bgn.max(0);
    let end = end.min(len - 1);
    if bgn > end {
        return;
    }
    for v in graph[bgn as usize..=end as usize].iter_mut() {
        *v += val;
    }
}

/// Intervals where each run below `threshold` reaches its lowest value.
pub fn find_peak_bad(graph: &[i32], threshold: i32) -> Vec<SeqInterval> {
    let mut peaks = Vec::new();
    let mut in_run = false;
    let mut peak_val = 0_i32;
    let mut peak = SeqInterval::new(0, 0);
    let mut on_plateau = false;
    for (i, &v) in graph.iter().enumerate() {
        let i = i as i32;
        if v < threshold {
            if !in_run || v < peak_val {
                in_run = true;
                peak_val = v;
                peak = SeqInterval::new(i, i);
                on_plateau = true;
            } else if on_plateau && v == peak_val {
                peak.end = i;
            } else {
                on_plateau = false;
            }
        } else if in_run {
            peaks.push(peak);
            in_run = false;
        }
    }
    if in_run {
        peaks.push(peak);
    }
    peaks
}

#[derive(Debug, Default, Copy, Clone)]
pub struct MateSplitStats {
    pub bad_rev_peaks: usize,
    pub bad_fwd_peaks: usize,
    pub breaks: usize,
    pub splits: usize,
}

pub struct MateChecker<'a> {
    catalog: &'a ReadCatalog,
    params: &'a BogParameters,
    dists: FxHashMap<u32, Vec<i32>>,
}

impl<'a> MateChecker<'a> {
    pub fn new(catalog: &'a ReadCatalog, params: &'a BogParameters) -> Self {
        MateChecker {
            catalog,
            params,
            dists: FxHashMap::default(),
        }
    }

    /// Distances of the happy pairs inside one unitig, per library.
    pub fn check_unitig(&mut self, utg: &Unitig, graph: &UnitigGraph) -> LibraryStats {
        let mut libs = LibraryStats::default();
        // left read of a pair seen so far: Some(bgn) if forward, None if reverse
        let mut first_seen = FxHashMap::<u32, Option<i32>>::default();
        let mut other_tig = FxHashMap::<u32, u32>::default();
        let mut with_mate = 0_usize;
        let mut in_tig = 0_usize;
        let mut bad = 0_usize;

        for n in utg.placed_reads() {
            let mate = match self.catalog.mate_id(n.ident) {
                Some(m) => m,
                None => continue,
            };
            with_mate += 1;
            if graph.frag_in(mate) != Some(utg.id()) {
                if let Some(u) = graph.frag_in(mate) {
                    *other_tig.entry(u).or_insert(0) += 1;
                }
                continue;
            }
            in_tig += 1;
            match first_seen.get(&n.ident) {
                Some(&first) => match first {
                    Some(fwd_bgn) if n.position.is_reverse() => {
                        let dist = n.position.bgn - fwd_bgn;
                        let lib = self.catalog.library_id(n.ident);
                        libs.entry(lib).or_default().push(dist as f64);
                        self.dists.entry(lib).or_default().push(dist);
                    }
                    _ => bad += 1,
                },
                None => {
                    let first = if n.position.is_reverse() {
                        None
                    } else {
                        Some(n.position.bgn)
                    };
                    first_seen.insert(mate, first);
                }
            }
        }

        log::debug!(
            "unitig {}: {} reads, {} with mate, {} mated inside, {} badly oriented",
            utg.id(),
            utg.num_frags(),
            with_mate,
            in_tig,
            bad
        );
        for (u, cnt) in other_tig.iter() {
            log::debug!("unitig {}: {} mates in unitig {}", utg.id(), cnt, u);
        }
        for (lib, dc) in libs.iter() {
            log::debug!(
                "unitig {}: library {} has {} pairs, mean {:.1} stddev {:.1}",
                utg.id(),
                lib,
                dc.num_pairs(),
                dc.mean(),
                dc.stddev()
            );
        }
        libs
    }

    /// Library statistics over all unitigs, trimmed of outliers.
    pub fn check_unitig_graph(&mut self, graph: &UnitigGraph) -> LibraryStats {
        self.dists.clear();
        let mut merged = LibraryStats::default();
        for utg in graph.unitigs() {
            for (lib, dc) in self.check_unitig(utg, graph) {
                merged.entry(lib).or_default().merge(&dc);
            }
        }
        for (lib, dc) in merged.iter() {
            log::info!(
                "library {}: {} pairs, mean {:.1} stddev {:.1} before trimming",
                lib,
                dc.num_pairs(),
                dc.mean(),
                dc.stddev()
            );
        }

        let mut global = LibraryStats::default();
        let mut libs: Vec<u32> = self.dists.keys().copied().collect();
        libs.sort_unstable();
        for lib in libs {
            if let Some(dists) = self.dists.get_mut(&lib) {
                log::info!("library {}:", lib);
                if let Some(dc) = robust_stats(dists) {
                    global.insert(lib, dc);
                }
            }
        }
        global
    }

    pub fn compute_mate_coverage(&self, utg: &Unitig, global: &LibraryStats) -> MateCoverage {
        let tig_len = utg.length().max(0);
        let mut good = vec![0_i32; tig_len as usize];
        let mut bad_fwd = vec![0_i32; tig_len as usize];
        let mut bad_rev = vec![0_i32; tig_len as usize];
        let mut table = MateLocation::build(utg, self.catalog);

        for e in table.table.iter_mut() {
            let stats = match global.get(&e.lib) {
                Some(s) if s.num_pairs() > 0 => s,
                _ => continue,
            };
            let b = MateBounds::new(stats, self.params.bad_mate_stddev);
            let class = classify_pair(e, stats, self.params, tig_len);
            let (p1, p2) = (e.pos1, e.pos2);

            match e.id2 {
                None => {
                    if class == MateClass::Bad {
                        if p1.is_reverse() {
                            incr_range(&mut bad_rev, -1, p1.bgn - b.bad_max, p1.bgn);
                        } else {
                            incr_range(&mut bad_fwd, -1, p1.end, p1.bgn + b.bad_max);
                        }
                    }
                }
                Some(_) => {
                    if class == MateClass::Good {
                        incr_range(&mut good, 2, p1.bgn, p2.end);
                    } else {
                        // each read of the pair points where its mate should be
                        for p in [p1, p2].iter() {
                            if p.is_reverse() {
                                incr_range(&mut bad_rev, -1, p.bgn - b.bad_max, p.end);
                            } else {
                                incr_range(&mut bad_fwd, -1, p.end, p.bgn + b.bad_max);
                            }
                        }
                    }
                }
            }
            if class == MateClass::Bad {
                e.is_bad = true;
                log::debug!(
                    "bad mate {} pos {} mate {:?} lib {}",
                    e.id1,
                    p1,
                    e.id2,
                    e.lib
                );
            }
        }

        MateCoverage {
            good,
            bad_fwd,
            bad_rev,
            table,
        }
    }

    /// Break points for the bad-reverse peaks of one unitig.
    pub fn mate_breaks(&self, utg: &Unitig, cov: &MateCoverage) -> (Vec<BreakPoint>, usize, usize) {
        let fwd_peaks = find_peak_bad(&cov.bad_fwd, self.params.peak_threshold);
        let rev_peaks = find_peak_bad(&cov.bad_rev, self.params.peak_threshold);
        for p in fwd_peaks.iter() {
            log::info!("unitig {}: bad forward mate peak {}", utg.id(), p);
        }

        let entries = cov.table.entries();
        let mut breaks = Vec::new();
        let mut k = 0_usize;
        let mut in_bad = false;
        for peak in rev_peaks.iter() {
            log::info!("unitig {}: bad reverse mate peak {}", utg.id(), peak);
            // the entry a break is taken at is seen again by the next peak
            while k < entries.len() {
                let e = &entries[k];
                if !in_bad && e.pos1.min() > peak.bgn {
                    in_bad = true;
                }
                if in_bad && e.is_bad && e.on_path1 {
                    let end = ReadEnd::new(e.id1, e.pos1.is_reverse());
                    log::info!("unitig {}: mate break at {}", utg.id(), end);
                    breaks.push(BreakPoint::new(end, MATE_BREAK_IN_SIZE, MATE_BREAK_IN_FRAGS));
                    in_bad = false;
                    break;
                }
                k += 1;
            }
        }
        (breaks, fwd_peaks.len(), rev_peaks.len())
    }

    /// Split every unitig at the peaks of mates that point off it.
    pub fn split_bad_mates(
        &mut self,
        graph: &mut UnitigGraph,
        global: &LibraryStats,
    ) -> Result<MateSplitStats, BogError> {
        let mut stats = MateSplitStats::default();
        let carried = carried_by_path_reads(graph, self.catalog.num_reads());
        let ids: Vec<u32> = graph.unitigs().map(|u| u.id()).collect();
        for tid in ids {
            let utg = match graph.unitig(tid) {
                Some(u) => u,
                None => continue,
            };
            let cov = self.compute_mate_coverage(utg, global);
            let (points, nfwd, nrev) = self.mate_breaks(utg, &cov);
            stats.bad_fwd_peaks += nfwd;
            stats.bad_rev_peaks += nrev;
            if points.is_empty() {
                continue;
            }
            let points: Vec<(BreakPoint, Option<u32>)> = points.into_iter().map(|p| (p, None)).collect();
            let cands = make_candidates(utg, &points, &carried);
            let (kept, dropped) = select_breaks(utg, cands, self.params);
            for c in dropped.iter() {
                log::info!("unitig {}: mate break at {} dropped", tid, c.point.frag_end);
            }
            if kept.is_empty() {
                continue;
            }
            let breaks: Vec<BreakPoint> = kept.iter().map(|c| c.point).collect();
            if !graph.break_unitig_at(tid, &breaks)?.is_empty() {
                stats.splits += 1;
                stats.breaks += breaks.len();
            }
        }
        log::info!(
            "mate based splits: {} breaks in {} unitigs ({} reverse, {} forward peaks)",
            stats.breaks,
            stats.splits,
            stats.bad_rev_peaks,
            stats.bad_fwd_peaks
        );
        Ok(stats)
    }

    pub fn run(&mut self, graph: &mut UnitigGraph) -> Result<MateSplitStats, BogError> {
        let global = self.check_unitig_graph(graph);
        if global.is_empty() {
            log::info!("no mate pairs inside unitigs, skipping mate checks");
            return Ok(MateSplitStats::default());
        }
        self.split_bad_mates(graph, &global)
    }
}

#[cfg(test)]
mod tests {
    use super::super::read_catalog::ReadInfo;
    use super::super::test_utils::*;
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn mated_catalog(n: usize, pairs: &[(u32, u32)]) -> ReadCatalog {
        let mut mates = vec![None; n];
        for &(a, b) in pairs {
            mates[a as usize] = Some(b);
            mates[b as usize] = Some(a);
        }
        ReadCatalog::from_reads(mates.into_iter().map(|m| ReadInfo::new(1000, 0, m)).collect())
    }

    fn internal(p1: SeqInterval, p2: SeqInterval) -> MateLocationEntry {
        MateLocationEntry {
            id1: 0,
            pos1: p1,
            on_path1: true,
            id2: Some(1),
            pos2: p2,
            lib: 0,
            is_bad: false,
        }
    }

    #[test]
    fn distance_compute_merges() {
        let mut a = DistanceCompute::from_values(&[1900, 2000]);
        let b = DistanceCompute::from_values(&[2100]);
        a.merge(&b);
        assert_eq!(a.num_pairs(), 3);
        assert!((a.mean() - 2000.0).abs() < 1e-9);
        assert!((a.stddev() - 100.0).abs() < 1e-9);
        assert_eq!(DistanceCompute::from_values(&[5]).stddev(), 0.0);
    }

    #[test]
    fn robust_stats_trim_outliers() {
        let mut d = vec![100_000, 2010, 1990, 2005, 2000, 1995];
        let dc = robust_stats(&mut d).unwrap();
        assert_eq!(dc.num_pairs(), 5);
        assert!((dc.mean() - 2000.0).abs() < 1e-9);
        assert!((dc.stddev() - 62.5_f64.sqrt()).abs() < 1e-9);
        assert!(robust_stats(&mut Vec::new()).is_none());
    }

    #[test]
    fn classify_pairs_from_a_sampled_library() {
        let mut rng = StdRng::seed_from_u64(42);
        let dists: Vec<i32> = (0..2000).map(|_| rng.gen_range(1700, 2300)).collect();
        let stats = DistanceCompute::from_values(&dists);
        let (mu, sd) = (stats.mean(), stats.stddev());
        let params = params();

        for k in [-2.0, -1.0, 0.0, 1.0, 2.0].iter() {
            let d = (mu + k * sd) as i32;
            let e = internal(SeqInterval::new(1000, 2000), SeqInterval::new(1000 + d, d));
            assert_eq!(classify_pair(&e, &stats, &params, 50_000), MateClass::Good);
        }
        let far = (mu + 7.0 * sd) as i32;
        let e = internal(SeqInterval::new(1000, 2000), SeqInterval::new(1000 + far, far));
        assert_eq!(classify_pair(&e, &stats, &params, 50_000), MateClass::Bad);

        let d = mu as i32;
        let innie = internal(SeqInterval::new(2000, 1000), SeqInterval::new(1000 + d, d));
        assert_eq!(classify_pair(&innie, &stats, &params, 50_000), MateClass::Bad);
        let same = internal(SeqInterval::new(1000, 2000), SeqInterval::new(d, 1000 + d));
        assert_eq!(classify_pair(&same, &stats, &params, 50_000), MateClass::Bad);
    }

    #[test]
    fn peaks_are_found_at_the_minimum() {
        let g = vec![0, -4, -5, -5, -4, 0, -2, -4, -4];
        let peaks = find_peak_bad(&g, -3);
        assert_eq!(peaks, vec![SeqInterval::new(2, 3), SeqInterval::new(7, 8)]);
        assert!(find_peak_bad(&[0, -3, -3], -3).is_empty());
    }

    #[test]
    fn next_peak_starts_from_the_read_broken_at() {
        let catalog = mated_catalog(10, &[]);
        let params = params();
        let mc = MateChecker::new(&catalog, &params);
        let utg = unitig_of(0, vec![node(6, 0, 100)]);

        let entry = |id: u32, pos: SeqInterval, is_bad: bool| MateLocationEntry {
            id1: id,
            pos1: pos,
            on_path1: true,
            id2: None,
            pos2: SeqInterval::default(),
            lib: 0,
            is_bad,
        };
        let mut bad_rev = vec![0_i32; 100];
        for i in 10..13 {
            bad_rev[i] = -5;
        }
        for i in 20..23 {
            bad_rev[i] = -5;
        }
        let cov = MateCoverage {
            good: vec![0; 100],
            bad_fwd: vec![0; 100],
            bad_rev,
            table: MateLocation {
                table: vec![
                    entry(6, SeqInterval::new(5, 50), false),
                    entry(7, SeqInterval::new(40, 25), true),
                    entry(8, SeqInterval::new(90, 60), true),
                ],
            },
        };
        let (points, nfwd, nrev) = mc.mate_breaks(&utg, &cov);
        assert_eq!((nfwd, nrev), (0, 2));
        let ends: Vec<ReadEnd> = points.iter().map(|p| p.frag_end).collect();
        assert_eq!(ends, vec![ReadEnd::three(7), ReadEnd::three(7)]);
    }

    #[test]
    fn unitig_pairs_give_library_distances() {
        // 0 forward then 2 reverse is happy; 1 reverse then 3 forward is not
        let catalog = mated_catalog(5, &[(0, 2), (1, 3)]);
        let utg = unitig_of(
            0,
            vec![
                node(0, 0, 1000),
                node(1, 1500, 500),
                node(2, 2000, 1000),
                node(3, 1500, 2500),
            ],
        );
        let g = UnitigGraph::from_unitigs(5, vec![utg]);
        let params = params();
        let mut mc = MateChecker::new(&catalog, &params);
        let libs = mc.check_unitig(g.unitig(0).unwrap(), &g);
        let dc = libs[&0];
        assert_eq!(dc.num_pairs(), 1);
        assert_eq!(dc.mean(), 2000.0);
    }

    #[test]
    fn external_mates_split_a_unitig() {
        // 20 reads 500 apart, reads 10..14 reversed with mates in another unitig
        let pairs: Vec<(u32, u32)> = (10..15).map(|i| (i, i + 10)).collect();
        let catalog = mated_catalog(25, &pairs);
        let main = unitig_of(
            0,
            (0..20)
                .map(|i| {
                    let b = i as i32 * 500;
                    if (10..15).contains(&i) {
                        node(i, b + 1000, b)
                    } else {
                        node(i, b, b + 1000)
                    }
                })
                .collect(),
        );
        let other = unitig_of(1, (20..25).map(|i| node(i, (i as i32 - 20) * 500, (i as i32 - 20) * 500 + 1000)).collect());
        let mut g = UnitigGraph::from_unitigs(25, vec![main, other]);

        let mut global = LibraryStats::default();
        global.insert(0, DistanceCompute::from_values(&[1900, 2000, 2100]));
        let params = params();
        let mut mc = MateChecker::new(&catalog, &params);

        let cov = mc.compute_mate_coverage(g.unitig(0).unwrap(), &global);
        assert_eq!(cov.bad_rev[5700], -5);
        assert_eq!(cov.bad_rev[5200], -4);
        assert_eq!(cov.bad_rev[4700], -3);
        let (points, _, nrev) = mc.mate_breaks(g.unitig(0).unwrap(), &cov);
        assert_eq!(nrev, 1);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].frag_end, ReadEnd::three(12));

        let stats = mc.split_bad_mates(&mut g, &global).unwrap();
        assert_eq!(stats.splits, 1);
        assert_eq!(g.num_unitigs(), 3);
        let left = g.unitig(g.frag_in(11).unwrap()).unwrap();
        let right = g.unitig(g.frag_in(12).unwrap()).unwrap();
        assert_eq!(path_ids(left), (0..12).collect::<Vec<u32>>());
        assert_eq!(path_ids(right), (12..20).collect::<Vec<u32>>());
        assert_eq!(right.first().unwrap().position.min(), 0);
    }
}
