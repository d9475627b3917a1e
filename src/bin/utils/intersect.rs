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
// find reads whose best edge lands in the middle of another unitig, and cut there
//

use super::best_overlap::{BestOverlapGraph, ReadEnd};
use super::error::BogError;
use super::unitig::{SeqInterval, Unitig};
use super::unitig_graph::{BreakPoint, UnitigGraph};
use super::{BogParameters, BreakPolicy};
use rustc_hash::{FxHashMap, FxHashSet};
use std::fs::File;
use std::io::{BufWriter, Write};

const ARRIVAL_RATIO_MIN: f64 = 1.8;

/// A best edge from a dovetail read into the interior of another unitig.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Invasion {
    pub invader: ReadEnd,
    pub target: ReadEnd,
    pub a_hang: i32,
    pub b_hang: i32,
    pub invader_utg: u32,
    pub target_utg: u32,
    pub target_index: usize,
}

impl Invasion {
    /// overlap orientation code, from the two ends that meet
    pub fn orientation(&self) -> char {
        match (self.invader.three_prime, self.target.three_prime) {
            (false, false) => 'O',
            (false, true) => 'A',
            (true, false) => 'N',
            (true, true) => 'I',
        }
    }
}

#[derive(Debug, Copy, Clone)]
pub struct BreakCandidate {
    pub point: BreakPoint,
    pub invader: Option<u32>,
    pub path_index: usize,
    pub frag_pos: SeqInterval,
    // coordinate of the cut
    pub position: i32,
    // reads up to and including this one, and the reads riding in them
    pub frags_before: u32,
    pub frags_after: u32,
    // this read and the reads riding in it
    pub read_frags: u32,
}

impl BreakCandidate {
    /// the cut goes before the read, on its left side in the unitig
    pub fn is_left_break(&self) -> bool {
        self.point.frag_end.three_prime == self.frag_pos.is_reverse()
    }

    fn frags_left_of_cut(&self) -> u32 {
        if self.is_left_break() {
            self.frags_before - self.read_frags
        } else {
            self.frags_before
        }
    }

    fn cut_index(&self) -> usize {
        if self.is_left_break() {
            self.path_index
        } else {
            self.path_index + 1
        }
    }
}

#[derive(Debug, Default, Copy, Clone)]
pub struct ResolveStats {
    pub rounds: usize,
    pub invasions: usize,
    pub breaks: usize,
    pub tolerated: usize,
    pub splits: usize,
}

/// Scan the best edges of all dovetail reads for invasions not yet tolerated.
pub fn find_invasions(graph: &UnitigGraph, bog: &BestOverlapGraph) -> Vec<Invasion> {
    let mut invasions = Vec::<Invasion>::new();
    for utg in graph.unitigs() {
        for n in utg.dovetail_path() {
            for &three_prime in [false, true].iter() {
                let end = ReadEnd::new(n.ident, three_prime);
                let e = bog.best_edge_at(end);
                let target = match e.partner() {
                    Some(t) => t,
                    None => continue,
                };
                let target_utg = match graph.frag_in(target.id) {
                    Some(u) if u != utg.id() => u,
                    _ => continue,
                };
                if graph.is_suppressed(n.ident, target.id) {
                    continue;
                }
                let tig = match graph.unitig(target_utg) {
                    Some(t) => t,
                    None => continue,
                };
                let idx = match tig.path_index(target.id) {
                    Some(i) => i,
                    None => continue,
                };
                if idx == 0 || idx + 1 == tig.dovetail_path().len() {
                    continue;
                }
                invasions.push(Invasion {
                    invader: end,
                    target,
                    a_hang: e.a_hang(),
                    b_hang: e.b_hang(),
                    invader_utg: utg.id(),
                    target_utg,
                    target_index: idx,
                });
            }
        }
    }
    invasions.sort_by_key(|i| (i.target_utg, i.target_index, i.invader));
    invasions
}

/// How many reads travel with each dovetail read: the reads contained in it,
/// directly or through other contained reads.
pub fn carried_by_path_reads(graph: &UnitigGraph, num_reads: usize) -> Vec<u32> {
    let mut carried = vec![0_u32; num_reads];
    for utg in graph.unitigs() {
        let container_of: FxHashMap<u32, u32> = utg
            .contains()
            .iter()
            .filter_map(|n| n.contained.map(|c| (n.ident, c)))
            .collect();
        for n in utg.contains() {
            let mut root = n.ident;
            let mut steps = 0;
            while let Some(&c) = container_of.get(&root) {
                root = c;
                steps += 1;
                if steps > container_of.len() {
                    break;
                }
            }
            carried[root as usize] += 1;
        }
    }
    carried
}

/// Turn break points on `utg` into candidates, in path order.
pub fn make_candidates(
    utg: &Unitig,
    points: &[(BreakPoint, Option<u32>)],
    carried: &[u32],
) -> Vec<BreakCandidate> {
    let path = utg.dovetail_path();
    let mut through = Vec::with_capacity(path.len());
    let mut acc = 0_u32;
    for n in path {
        acc += 1 + carried.get(n.ident as usize).copied().unwrap_or(0);
        through.push(acc);
    }
    let total = acc;
    let index: FxHashMap<u32, usize> = path.iter().enumerate().map(|(i, n)| (n.ident, i)).collect();

    let mut cands: Vec<BreakCandidate> = points
        .iter()
        .filter_map(|&(point, invader)| {
            let i = *index.get(&point.frag_end.id)?;
            let n = &path[i];
            let position = if point.frag_end.three_prime {
                n.position.end
            } else {
                n.position.bgn
            };
            Some(BreakCandidate {
                point,
                invader,
                path_index: i,
                frag_pos: n.position,
                position,
                frags_before: through[i],
                frags_after: total - through[i],
                read_frags: 1 + carried.get(n.ident as usize).copied().unwrap_or(0),
            })
        })
        .collect();
    cands.sort_by_key(|c| (c.path_index, !c.is_left_break()));
    cands
}

/// Drop candidates that leave a piece with too few reads or too short a span.
pub fn filter_small_pieces(
    utg: &Unitig,
    cands: Vec<BreakCandidate>,
    params: &BogParameters,
) -> (Vec<BreakCandidate>, Vec<BreakCandidate>) {
    let path = utg.dovetail_path();
    let n = path.len();
    let tig_len = utg.length();
    // prefix_max[k]: right edge of path[..k]; suffix_min[k]: left edge of path[k..]
    let mut prefix_max = vec![0_i32; n + 1];
    for k in 0..n {
        prefix_max[k + 1] = prefix_max[k].max(path[k].position.max());
    }
    let mut suffix_min = vec![tig_len; n + 1];
    for k in (0..n).rev() {
        suffix_min[k] = suffix_min[k + 1].min(path[k].position.min());
    }
    let total = cands.first().map_or(0, |c| c.frags_before + c.frags_after);

    let mut kept = Vec::new();
    let mut dropped = Vec::new();
    for c in cands {
        let k = c.cut_index();
        let before_frags = c.frags_left_of_cut();
        let after_frags = total - before_frags;
        let before_len = prefix_max[k];
        let after_len = tig_len - suffix_min[k];
        if before_frags < params.min_break_frags
            || after_frags < params.min_break_frags
            || before_len < params.min_break_length as i32
            || after_len < params.min_break_length as i32
        {
            log::debug!(
                "unitig {}: break at {} leaves pieces of {}/{} reads, {}/{} bases, dropped",
                utg.id(),
                c.point.frag_end,
                before_frags,
                after_frags,
                before_len,
                after_len
            );
            dropped.push(c);
        } else {
            kept.push(c);
        }
    }
    (kept, dropped)
}

/// Keep the leftmost cut of every run of cuts spaced closer than `window`.
pub fn cluster_breaks(
    mut cands: Vec<BreakCandidate>,
    window: u32,
) -> (Vec<BreakCandidate>, Vec<BreakCandidate>) {
    cands.sort_by_key(|c| (c.position, c.path_index));
    let mut kept = Vec::<BreakCandidate>::new();
    let mut dropped = Vec::<BreakCandidate>::new();
    let mut prev: Option<i32> = None;
    for c in cands {
        let same_cluster = prev.map_or(false, |p| c.position - p <= window as i32);
        prev = Some(c.position);
        if !same_cluster {
            kept.push(c);
            continue;
        }
        // the same cut again, or the other end of a kept read
        let keep = kept
            .iter()
            .any(|k| k.point.frag_end.id == c.point.frag_end.id);
        if keep {
            kept.push(c);
        } else {
            dropped.push(c);
        }
    }
    kept.sort_by_key(|c| (c.path_index, !c.is_left_break()));
    (kept, dropped)
}

fn is_big(c: &BreakCandidate, params: &BogParameters) -> bool {
    c.point.in_frags > params.min_break_frags && c.point.in_size > params.min_break_length as i32
}

/// Pick the small break between two big ones whose sides differ most in arrival rate.
fn select_small(
    smalls: &[BreakCandidate],
    big: &BreakCandidate,
    last_coord: &mut i32,
    last_frags: &mut u32,
) -> Option<BreakCandidate> {
    let r_frgs = big.frags_left_of_cut() as f64;
    let right = big.position as f64;
    let mut selection = None;
    let mut difference = 0.0_f64;

    for s in smalls {
        if s.point.frag_end.id == big.point.frag_end.id {
            continue;
        }
        let l_frgs = s.frags_left_of_cut() as f64;
        if r_frgs - l_frgs == 1.0 {
            continue;
        }
        // middle of the read rather than its end
        let bp = (s.frag_pos.bgn + s.frag_pos.end) as f64 / 2.0;
        if bp <= *last_coord as f64 || right <= bp {
            continue;
        }
        let l_rate = (l_frgs - *last_frags as f64) / (bp - *last_coord as f64);
        let r_rate = (r_frgs - l_frgs) / (right - bp);
        if l_rate <= 0.0 || r_rate <= 0.0 {
            continue;
        }
        let ratio = if l_rate > r_rate {
            l_rate / r_rate
        } else {
            r_rate / l_rate
        };
        let diff = (l_rate - r_rate).abs();
        if ratio > ARRIVAL_RATIO_MIN && diff > difference {
            log::debug!(
                "small break at {} selected on arrival rate {:.4} vs {:.4}",
                s.point.frag_end,
                l_rate,
                r_rate
            );
            difference = diff;
            selection = Some(*s);
        }
    }

    *last_coord = big.position;
    *last_frags = big.frags_left_of_cut();
    selection
}

/// Keep the big breaks, and between two of them at most one small break chosen
/// on fragment arrival rate.
pub fn select_by_arrival(
    utg: &Unitig,
    cands: Vec<BreakCandidate>,
    params: &BogParameters,
) -> (Vec<BreakCandidate>, Vec<BreakCandidate>) {
    let total = cands.first().map_or(0, |c| c.frags_before + c.frags_after);
    let last = match utg.last() {
        Some(l) => *l,
        None => return (Vec::new(), cands),
    };
    // a stand-in break at the far end of the unitig
    let fake_end = BreakCandidate {
        point: BreakPoint::new(
            ReadEnd::new(last.ident, !last.position.is_reverse()),
            i32::MAX,
            0,
        ),
        invader: None,
        path_index: utg.dovetail_path().len().saturating_sub(1),
        frag_pos: last.position,
        position: last.position.max(),
        frags_before: total,
        frags_after: 0,
        read_frags: 1,
    };

    let mut last_coord = 0_i32;
    let mut last_frags = 0_u32;
    let mut smalls = Vec::<BreakCandidate>::new();
    let mut selected = Vec::<BreakCandidate>::new();

    for c in cands.iter() {
        let seen = selected
            .last()
            .map_or(false, |b: &BreakCandidate| b.point.frag_end == c.point.frag_end);
        if is_big(c, params) {
            if seen {
                continue;
            }
            if !smalls.is_empty() {
                if let Some(s) = select_small(&smalls, c, &mut last_coord, &mut last_frags) {
                    selected.push(s);
                }
                smalls.clear();
            } else {
                last_coord = c.position;
                last_frags = c.frags_left_of_cut();
            }
            selected.push(*c);
        } else if !seen
            && smalls
                .last()
                .map_or(true, |s| s.point.frag_end != c.point.frag_end)
        {
            smalls.push(*c);
        }
    }
    if !smalls.is_empty() {
        if let Some(s) = select_small(&smalls, &fake_end, &mut last_coord, &mut last_frags) {
            selected.push(s);
        }
    }

    let chosen: FxHashSet<ReadEnd> = selected.iter().map(|c| c.point.frag_end).collect();
    let (kept, dropped): (Vec<_>, Vec<_>) = cands
        .into_iter()
        .partition(|c| chosen.contains(&c.point.frag_end));
    (kept, dropped)
}

/// The configured policy, returns (kept, dropped).
pub fn select_breaks(
    utg: &Unitig,
    cands: Vec<BreakCandidate>,
    params: &BogParameters,
) -> (Vec<BreakCandidate>, Vec<BreakCandidate>) {
    match params.break_policy {
        BreakPolicy::Spacing => {
            let (kept, mut dropped) = filter_small_pieces(utg, cands, params);
            let (kept, more) = cluster_breaks(kept, params.break_cluster_window);
            dropped.extend(more);
            (kept, dropped)
        }
        BreakPolicy::Arrival => select_by_arrival(utg, cands, params),
    }
}

pub struct IntersectionResolver<'a> {
    bog: &'a BestOverlapGraph,
    params: &'a BogParameters,
    out: Option<BufWriter<File>>,
}

impl<'a> IntersectionResolver<'a> {
    pub fn new(
        bog: &'a BestOverlapGraph,
        params: &'a BogParameters,
        prefix: Option<&str>,
    ) -> Result<Self, BogError> {
        let out = match prefix {
            Some(p) => Some(BufWriter::new(File::create(format!("{}.breaks", p))?)),
            None => None,
        };
        Ok(IntersectionResolver { bog, params, out })
    }

    fn report_bubbles(&self, graph: &UnitigGraph) {
        for utg in graph.unitigs() {
            let (first, last) = match (utg.first(), utg.last()) {
                (Some(f), Some(l)) if utg.dovetail_path().len() > 1 => (f, l),
                _ => continue,
            };
            let first_out = self
                .bog
                .best_edge(first.ident, first.position.is_reverse())
                .partner_id();
            let last_out = self
                .bog
                .best_edge(last.ident, !last.position.is_reverse())
                .partner_id();
            if let (Some(a), Some(b)) = (first_out, last_out) {
                let other = graph.frag_in(a);
                if other.is_none() || other != graph.frag_in(b) || other == Some(utg.id()) {
                    continue;
                }
                log::debug!(
                    "bubble: unitig {} (length {}) between read {} and read {} of unitig {}",
                    utg.id(),
                    utg.length(),
                    a,
                    b,
                    other.unwrap_or(0)
                );
            }
        }
    }

    fn write_invasion(&mut self, inv: &Invasion) -> Result<(), BogError> {
        if let Some(out) = self.out.as_mut() {
            writeln!(
                out,
                "I {} {} {} {} {} {} {}",
                inv.invader.id,
                inv.target.id,
                inv.orientation(),
                inv.a_hang,
                inv.b_hang,
                inv.invader_utg,
                inv.target_utg
            )?;
        }
        Ok(())
    }

    fn write_candidate(
        &mut self,
        utg_id: u32,
        c: &BreakCandidate,
        status: &str,
    ) -> Result<(), BogError> {
        if let Some(out) = self.out.as_mut() {
            writeln!(
                out,
                "B {} {} {} {} {} {} {} {} {} {}",
                utg_id,
                c.point.frag_end.id,
                if c.point.frag_end.three_prime { 3 } else { 5 },
                c.invader.map_or(-1, |i| i as i64),
                c.position,
                c.frags_before,
                c.frags_after,
                c.point.in_size,
                c.point.in_frags,
                status
            )?;
        }
        Ok(())
    }

    /// Break unitigs at invasions until a scan finds none that are not tolerated.
    pub fn resolve(&mut self, graph: &mut UnitigGraph) -> Result<ResolveStats, BogError> {
        let mut stats = ResolveStats::default();
        let carried = self.bog.carried_reads();

        loop {
            let invasions = find_invasions(graph, self.bog);
            if invasions.is_empty() {
                break;
            }
            stats.rounds += 1;
            stats.invasions += invasions.len();
            log::info!("intersection round {}: {} invasions", stats.rounds, invasions.len());

            let mut by_target = FxHashMap::<u32, Vec<Invasion>>::default();
            for inv in invasions.iter() {
                self.write_invasion(inv)?;
                by_target.entry(inv.target_utg).or_default().push(*inv);
            }
            let mut targets: Vec<u32> = by_target.keys().copied().collect();
            targets.sort_unstable();

            for tid in targets {
                let utg = match graph.unitig(tid) {
                    Some(u) => u,
                    None => continue,
                };
                let points: Vec<(BreakPoint, Option<u32>)> = by_target[&tid]
                    .iter()
                    .map(|inv| {
                        let (in_size, in_frags) = graph
                            .frag_in(inv.invader.id)
                            .and_then(|u| graph.unitig(u))
                            .map_or((0, 0), |u| (u.length(), u.num_frags() as u32));
                        (BreakPoint::new(inv.target, in_size, in_frags), Some(inv.invader.id))
                    })
                    .collect();
                let cands = make_candidates(utg, &points, &carried);
                let (kept, dropped) = select_breaks(utg, cands, self.params);

                for c in dropped.iter() {
                    self.write_candidate(tid, c, "tolerated")?;
                }
                for c in kept.iter() {
                    self.write_candidate(tid, c, "break")?;
                }

                let breaks: Vec<BreakPoint> = kept.iter().map(|c| c.point).collect();
                let pieces = if breaks.is_empty() {
                    Vec::new()
                } else {
                    graph.break_unitig_at(tid, &breaks)?
                };
                if pieces.is_empty() {
                    stats.tolerated += kept.len();
                    for c in kept.iter() {
                        if let Some(i) = c.invader {
                            graph.suppress_invasion(i, c.point.frag_end.id);
                        }
                    }
                } else {
                    stats.splits += 1;
                    stats.breaks += kept.len();
                }
                stats.tolerated += dropped.len();
                for c in dropped.iter() {
                    if let Some(i) = c.invader {
                        graph.suppress_invasion(i, c.point.frag_end.id);
                    }
                }
            }
        }

        self.report_bubbles(graph);
        if let Some(out) = self.out.as_mut() {
            out.flush()?;
        }
        log::info!(
            "intersections: {} invasions over {} rounds, {} breaks in {} splits, {} tolerated",
            stats.invasions,
            stats.rounds,
            stats.breaks,
            stats.splits,
            stats.tolerated
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::super::chunk_graph::ChunkGraph;
    use super::super::overlap::Overlap;
    use super::super::read_catalog::ReadCatalog;
    use super::super::test_utils::*;
    use super::*;

    // A-B-C in one unitig, D's 3' end hits the 3' end of B
    fn invaded() -> (ReadCatalog, BestOverlapGraph, UnitigGraph) {
        let catalog = catalog_of(&[1000, 1000, 1000, 1000]);
        let mut ovlps = chain_overlaps(&[0, 1, 2], 1000, 500);
        ovlps.push(Overlap::new(3, 1, 700, 700, true, 0.01));
        let bog = build_bog(&catalog, ovlps);
        let chunk = ChunkGraph::new(&bog, &catalog);
        let mut g = UnitigGraph::new(catalog.num_reads());
        g.build_dovetail_paths(&bog, &catalog, &chunk);
        (catalog, bog, g)
    }

    #[test]
    fn invasion_is_found_and_broken() {
        let (catalog, bog, mut g) = invaded();
        assert_eq!(g.num_unitigs(), 2);
        let inv = find_invasions(&g, &bog);
        assert_eq!(inv.len(), 1);
        assert_eq!(inv[0].invader, ReadEnd::three(3));
        assert_eq!(inv[0].target, ReadEnd::three(1));
        assert_eq!(inv[0].orientation(), 'I');

        let params = params();
        let mut resolver = IntersectionResolver::new(&bog, &params, None).unwrap();
        let stats = resolver.resolve(&mut g).unwrap();
        assert_eq!(stats.breaks, 1);
        assert_eq!(stats.splits, 1);
        assert_eq!(g.num_unitigs(), 3);

        let b_utg = g.unitig(g.frag_in(1).unwrap()).unwrap();
        assert_eq!(path_ids(b_utg), vec![0, 1]);
        assert_eq!(b_utg.last().unwrap().ident, 1);
        let c_utg = g.unitig(g.frag_in(2).unwrap()).unwrap();
        assert_eq!(path_ids(c_utg), vec![2]);
        assert_eq!(c_utg.first().unwrap().position.min(), 0);

        assert!(find_invasions(&g, &bog).is_empty());
        assert!(g.check_unitig_membership(&catalog).is_ok());
    }

    #[test]
    fn short_piece_is_tolerated() {
        let (_, bog, mut g) = invaded();
        let mut params = params();
        params.min_break_length = 1200;
        let mut resolver = IntersectionResolver::new(&bog, &params, None).unwrap();
        let stats = resolver.resolve(&mut g).unwrap();
        assert_eq!(stats.breaks, 0);
        assert_eq!(stats.tolerated, 1);
        assert_eq!(g.num_unitigs(), 2);
        assert!(g.is_suppressed(3, 1));
        assert!(find_invasions(&g, &bog).is_empty());
    }

    #[test]
    fn breaks_log_is_written() {
        let (_, bog, mut g) = invaded();
        let params = params();
        let prefix = std::env::temp_dir()
            .join(format!("bog_intersect_{}", std::process::id()))
            .to_string_lossy()
            .to_string();
        {
            let mut resolver = IntersectionResolver::new(&bog, &params, Some(&prefix)).unwrap();
            resolver.resolve(&mut g).unwrap();
        }
        let name = format!("{}.breaks", prefix);
        let text = std::fs::read_to_string(&name).unwrap();
        assert!(text.lines().any(|l| l.starts_with("I 3 1 I")));
        assert!(text.lines().any(|l| l.starts_with("B 0 1 3 3 1500") && l.ends_with("break")));
        std::fs::remove_file(&name).unwrap();
    }

    fn long_unitig() -> Unitig {
        // ten reads of 1000, each 300 past the previous one
        unitig_of(0, (0..10).map(|i| node(i, i as i32 * 300, i as i32 * 300 + 1000)).collect())
    }

    fn cand_points(ends: &[(ReadEnd, i32, u32)]) -> Vec<(BreakPoint, Option<u32>)> {
        ends.iter()
            .enumerate()
            .map(|(i, &(e, size, frags))| (BreakPoint::new(e, size, frags), Some(100 + i as u32)))
            .collect()
    }

    #[test]
    fn spacing_keeps_leftmost_of_a_cluster() {
        let utg = long_unitig();
        let carried = vec![0_u32; 10];
        // 5' of read 4 at 1200, 3' of read 1 at 1300, 5' of read 8 at 2400
        let points = cand_points(&[
            (ReadEnd::five(4), 5000, 5),
            (ReadEnd::three(1), 5000, 5),
            (ReadEnd::five(8), 5000, 5),
        ]);
        let cands = make_candidates(&utg, &points, &carried);
        assert_eq!(cands.len(), 3);
        assert_eq!(cands[0].point.frag_end, ReadEnd::three(1));
        assert_eq!(cands[0].frags_before, 2);

        let mut p = params();
        p.break_cluster_window = 150;
        let (kept, dropped) = select_breaks(&utg, cands, &p);
        let kept: Vec<ReadEnd> = kept.iter().map(|c| c.point.frag_end).collect();
        assert_eq!(kept, vec![ReadEnd::five(4), ReadEnd::five(8)]);
        assert_eq!(dropped.len(), 1);
        assert_eq!(dropped[0].point.frag_end, ReadEnd::three(1));
    }

    #[test]
    fn spacing_drops_cut_near_the_end() {
        let utg = long_unitig();
        let carried = vec![0_u32; 10];
        // cutting after read 0 leaves a 1000 base piece, before read 9 a 1000 base piece
        let points = cand_points(&[(ReadEnd::three(0), 5000, 5), (ReadEnd::five(9), 5000, 5)]);
        let cands = make_candidates(&utg, &points, &carried);
        let mut p = params();
        p.min_break_length = 1500;
        let (kept, dropped) = filter_small_pieces(&utg, cands, &p);
        assert!(kept.is_empty());
        assert_eq!(dropped.len(), 2);
    }

    #[test]
    fn both_ends_of_a_read_stay_together() {
        let utg = unitig_of(0, vec![node(0, 0, 1000), node(1, 900, 930), node(2, 920, 1920)]);
        let carried = vec![0_u32; 3];
        let points = cand_points(&[(ReadEnd::five(1), 5000, 5), (ReadEnd::three(1), 5000, 5)]);
        let mut p = params();
        p.min_break_length = 500;
        let (kept, _) = select_breaks(&utg, make_candidates(&utg, &points, &carried), &p);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn arrival_rate_picks_one_small_break() {
        let utg = long_unitig();
        let carried = vec![0_u32; 10];
        // big breaks after read 0 and after read 8, smalls in between
        let points = cand_points(&[
            (ReadEnd::five(1), 5000, 5),
            (ReadEnd::five(2), 100, 1),
            (ReadEnd::five(3), 100, 1),
            (ReadEnd::five(6), 100, 1),
            (ReadEnd::three(8), 5000, 5),
        ]);
        let cands = make_candidates(&utg, &points, &carried);
        let mut p = params();
        p.break_policy = BreakPolicy::Arrival;
        let (kept, dropped) = select_breaks(&utg, cands, &p);
        let kept: Vec<ReadEnd> = kept.iter().map(|c| c.point.frag_end).collect();
        // only the cut after read 1 splits the reads at clearly different rates
        assert_eq!(kept, vec![ReadEnd::five(1), ReadEnd::five(2), ReadEnd::three(8)]);
        assert_eq!(dropped.len(), 2);
    }
}
