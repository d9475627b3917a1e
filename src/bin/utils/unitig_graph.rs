// Peregrine Assembler and SHIMMER Genome Assembly Toolkit
// 2019, 2020, 2021- (c) by Jason, Chen-Shan, Chin
//
// This Source Code Form is subject to the terms of the
// Creative Commons Attribution-NonCommercial-ShareAlike 4.0 International License.
//
// You should have received a copy of the license along with this
// work. If not, see <http://creativecommons.org/licenses/by-nc-sa/4.0/>.

#![allow(dead_code)]

use super::best_overlap::{BestEdge, BestOverlapGraph, ReadEnd};
use super::chunk_graph::ChunkGraph;
use super::error::BogError;
use super::read_catalog::ReadCatalog;
use super::unitig::{DoveTailNode, SeqInterval, Unitig};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

/// A place to cut a unitig: the read end that the cut goes through, and how
/// big the evidence for it is.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BreakPoint {
    pub frag_end: ReadEnd,
    pub in_size: i32,
    pub in_frags: u32,
}

impl BreakPoint {
    pub fn new(frag_end: ReadEnd, in_size: i32, in_frags: u32) -> Self {
        BreakPoint {
            frag_end,
            in_size,
            in_frags,
        }
    }
}

/// hangs of a best edge turned into shifts along the walk direction
#[inline]
fn walk_hangs(e: &BestEdge) -> (i32, i32) {
    if e.a_hang() > 0 {
        (e.a_hang(), e.b_hang())
    } else {
        (-e.b_hang(), -e.a_hang())
    }
}

#[inline]
fn reset_far_end(bgn: &mut i32, end: &mut i32, len: u32) {
    if *bgn < *end {
        *end = *bgn + len as i32;
    } else {
        *bgn = *end + len as i32;
    }
}

pub struct UnitigGraph {
    unitigs: Vec<Option<Unitig>>,
    frag_in: Vec<Option<u32>>,
    // (invader, target) pairs that are not to be reported as intersections
    self_intersect: FxHashSet<(u32, u32)>,
}

impl UnitigGraph {
    pub fn new(num_reads: usize) -> Self {
        UnitigGraph {
            unitigs: Vec::new(),
            frag_in: vec![None; num_reads],
            self_intersect: FxHashSet::default(),
        }
    }

    /// Take unitigs built elsewhere, they are renumbered in the given order.
    pub fn from_unitigs(num_reads: usize, unitigs: Vec<Unitig>) -> Self {
        let mut g = UnitigGraph::new(num_reads);
        for mut utg in unitigs {
            let id = g.unitigs.len() as u32;
            utg.set_id(id);
            for n in utg.dovetail_path().iter().chain(utg.contains().iter()) {
                g.frag_in[n.ident as usize] = Some(id);
            }
            g.unitigs.push(Some(utg));
        }
        g
    }

    pub fn unitigs(&self) -> impl Iterator<Item = &Unitig> {
        self.unitigs.iter().flatten()
    }

    pub fn unitig(&self, id: u32) -> Option<&Unitig> {
        self.unitigs.get(id as usize).and_then(|u| u.as_ref())
    }

    pub fn num_unitigs(&self) -> usize {
        self.unitigs.iter().flatten().count()
    }

    /// the largest unitig id ever used plus one
    pub fn id_bound(&self) -> usize {
        self.unitigs.len()
    }

    #[inline]
    pub fn frag_in(&self, rid: u32) -> Option<u32> {
        self.frag_in[rid as usize]
    }

    pub fn suppress_invasion(&mut self, invader: u32, target: u32) {
        self.self_intersect.insert((invader, target));
    }

    pub fn is_suppressed(&self, invader: u32, target: u32) -> bool {
        self.self_intersect.contains(&(invader, target))
    }

    //
    // construction
    //

    pub fn build_dovetail_paths(
        &mut self,
        bog: &BestOverlapGraph,
        catalog: &ReadCatalog,
        chunk: &ChunkGraph,
    ) {
        log::info!("building unitigs from {} reads", catalog.num_reads());

        for rid in chunk.reads_by_chunk_length() {
            if catalog.is_deleted(rid)
                || self.frag_in[rid as usize].is_some()
                || bog.is_contained(rid)
            {
                continue;
            }

            let mut utg = Unitig::new(self.unitigs.len() as u32);
            self.populate_unitig(&mut utg, bog, catalog, rid, false, None);

            let tp_best = *bog.best_edge(rid, true);
            if let Some(p) = tp_best.partner() {
                match self.frag_in[p.id as usize] {
                    None => {
                        utg.reverse_complement();
                        log::debug!(
                            "continue unitig {} (length = {}) with read {} (hang {} {})",
                            utg.id(),
                            utg.length(),
                            p.id,
                            tp_best.a_hang(),
                            tp_best.b_hang()
                        );
                        self.populate_unitig(
                            &mut utg,
                            bog,
                            catalog,
                            p.id,
                            !p.three_prime,
                            Some(&tp_best),
                        );
                    }
                    Some(u) if u == utg.id() => {}
                    Some(u) => {
                        log::debug!(
                            "unitig intersect: unitig {} read {} -> unitig {} read {}",
                            utg.id(),
                            rid,
                            u,
                            p.id
                        );
                    }
                }
            }
            self.unitigs.push(Some(utg));
        }

        // reads with edges on both ends that no walk reached are pure cycles
        let mut missed = 0_usize;
        for rid in 0..catalog.num_reads() as u32 {
            if catalog.is_deleted(rid)
                || self.frag_in[rid as usize].is_some()
                || bog.is_contained(rid)
            {
                continue;
            }
            let has5 = !bog.best_edge(rid, false).is_empty();
            let has3 = !bog.best_edge(rid, true).is_empty();
            if has5 && has3 {
                let mut utg = Unitig::new(self.unitigs.len() as u32);
                self.populate_unitig(&mut utg, bog, catalog, rid, false, None);
                self.unitigs.push(Some(utg));
                missed += 1;
            } else {
                log::debug!("read {} missed with a single best edge", rid);
            }
        }
        log::info!(
            "{} unitigs built, {} from missed reads",
            self.num_unitigs(),
            missed
        );
    }

    /// Walk best edges from `first`, leaving each read through `walk_three_prime`.
    fn populate_unitig(
        &mut self,
        utg: &mut Unitig,
        bog: &BestOverlapGraph,
        catalog: &ReadCatalog,
        first: u32,
        mut walk_three_prime: bool,
        last_edge: Option<&BestEdge>,
    ) {
        if self.frag_in[first as usize].is_some() {
            return;
        }

        let (mut frag_bgn, mut frag_end) = match (utg.last(), last_edge) {
            (Some(last), Some(e)) => {
                let (ahang, bhang) = walk_hangs(e);
                let mut bgn = last.position.min() + ahang;
                let mut end = last.position.max() + bhang;
                reset_far_end(&mut bgn, &mut end, catalog.length(first));
                (bgn, end)
            }
            _ => (0, catalog.length(first) as i32),
        };

        let mut frag = first;
        loop {
            let next_edge = *bog.best_edge(frag, walk_three_prime);
            let position = if walk_three_prime {
                SeqInterval::new(frag_bgn, frag_end)
            } else {
                SeqInterval::new(frag_end, frag_bgn)
            };
            utg.add_frag(DoveTailNode::new(frag, position), 0);
            self.frag_in[frag as usize] = Some(utg.id());

            let next = match next_edge.partner() {
                Some(p) => p,
                None => break,
            };

            let (ahang, bhang) = walk_hangs(&next_edge);
            frag_bgn += ahang;
            frag_end += bhang;
            reset_far_end(&mut frag_bgn, &mut frag_end, catalog.length(next.id));
            walk_three_prime = !next.three_prime;

            if next.id == first {
                log::debug!("unitig {} closes a cycle at read {}", utg.id(), first);
                break;
            }
            match self.frag_in[next.id as usize] {
                None => frag = next.id,
                Some(u) if u == utg.id() => {
                    log::debug!("unitig {} lasso: read {} -> read {}", u, frag, next.id);
                    self.self_intersect.insert((frag, next.id));
                    break;
                }
                Some(u) => {
                    log::debug!(
                        "unitig intersect: unitig {} read {} -> unitig {} read {}",
                        utg.id(),
                        frag,
                        u,
                        next.id
                    );
                    break;
                }
            }
        }
    }

    /// Put every contained read inside its best container, containers first.
    pub fn place_contains(&mut self, bog: &BestOverlapGraph, catalog: &ReadCatalog) -> usize {
        let mut containees = FxHashMap::<u32, Vec<u32>>::default();
        for rid in 0..catalog.num_reads() as u32 {
            if catalog.is_deleted(rid) {
                continue;
            }
            if let Some(c) = bog.best_container(rid) {
                containees.entry(c.container()).or_default().push(rid);
            }
        }

        let mut positions = FxHashMap::<u32, SeqInterval>::default();
        let mut queue = VecDeque::<u32>::new();
        for utg in self.unitigs.iter().flatten() {
            for n in utg.dovetail_path().iter().chain(utg.contains().iter()) {
                positions.insert(n.ident, n.position);
                queue.push_back(n.ident);
            }
        }

        let mut placed = 0_usize;
        while let Some(cid) = queue.pop_front() {
            let list = match containees.get(&cid) {
                Some(l) => l,
                None => continue,
            };
            let (utg_id, cpos) = match (self.frag_in[cid as usize], positions.get(&cid)) {
                (Some(u), Some(p)) => (u, *p),
                _ => continue,
            };
            for &rid in list.iter() {
                if self.frag_in[rid as usize].is_some() {
                    continue;
                }
                let bc = match bog.best_container(rid) {
                    Some(bc) => *bc,
                    None => continue,
                };
                let len = catalog.length(rid) as i32;
                let left = if cpos.is_reverse() {
                    cpos.min() - bc.b_hang()
                } else {
                    cpos.min() + bc.a_hang()
                };
                let forward = cpos.is_reverse() != bc.same_orientation();
                let position = if forward {
                    SeqInterval::new(left, left + len)
                } else {
                    SeqInterval::new(left + len, left)
                };
                let mut node = DoveTailNode::new(rid, position);
                node.contained = Some(cid);
                if let Some(Some(utg)) = self.unitigs.get_mut(utg_id as usize) {
                    utg.add_contained(node, 0);
                    self.frag_in[rid as usize] = Some(utg_id);
                    positions.insert(rid, position);
                    queue.push_back(rid);
                    placed += 1;
                }
            }
        }
        log::info!("placed {} contained reads", placed);
        placed
    }

    /// Every read nobody placed becomes a unitig on its own.
    pub fn recover_zombies(&mut self, catalog: &ReadCatalog) -> usize {
        let mut zombies = 0_usize;
        for rid in 0..catalog.num_reads() as u32 {
            if catalog.is_deleted(rid) || self.frag_in[rid as usize].is_some() {
                continue;
            }
            let id = self.unitigs.len() as u32;
            let mut utg = Unitig::new(id);
            utg.add_frag(
                DoveTailNode::new(rid, SeqInterval::new(0, catalog.length(rid) as i32)),
                0,
            );
            log::info!("zombie read {} resurrected as unitig {}", rid, id);
            self.frag_in[rid as usize] = Some(id);
            self.unitigs.push(Some(utg));
            zombies += 1;
        }
        if zombies > 0 {
            log::info!("resurrected {} zombie reads", zombies);
        }
        zombies
    }

    pub fn check_unitig_membership(&self, catalog: &ReadCatalog) -> Result<(), BogError> {
        let mut seen = vec![0_u32; catalog.num_reads()];
        for utg in self.unitigs.iter().flatten() {
            for n in utg.dovetail_path().iter().chain(utg.contains().iter()) {
                let rid = n.ident as usize;
                if rid >= seen.len() {
                    return Err(BogError::Invariant(format!(
                        "unitig {} holds unknown read {}",
                        utg.id(),
                        rid
                    )));
                }
                seen[rid] += 1;
                if self.frag_in[rid] != Some(utg.id()) {
                    return Err(BogError::Invariant(format!(
                        "read {} is in unitig {} but is recorded in {:?}",
                        rid,
                        utg.id(),
                        self.frag_in[rid]
                    )));
                }
            }
        }
        for (rid, &cnt) in seen.iter().enumerate() {
            let deleted = catalog.is_deleted(rid as u32);
            if (deleted && cnt != 0) || (!deleted && cnt != 1) {
                return Err(BogError::Invariant(format!(
                    "read {} (deleted: {}) is placed {} times",
                    rid, deleted, cnt
                )));
            }
        }
        log::info!(
            "unitig membership checked: {} unitigs over {} reads",
            self.num_unitigs(),
            catalog.num_reads()
        );
        Ok(())
    }

    /// Record for every read the placed read it was laid out against.
    pub fn set_parent_and_hang(&mut self, bog: &BestOverlapGraph) {
        for utg in self.unitigs.iter_mut().flatten() {
            let path_idx: FxHashMap<u32, usize> = utg
                .dovetail_path()
                .iter()
                .enumerate()
                .map(|(i, n)| (n.ident, i))
                .collect();
            let mut positions: FxHashMap<u32, SeqInterval> = utg
                .dovetail_path()
                .iter()
                .map(|n| (n.ident, n.position))
                .collect();
            for n in utg.contains().iter() {
                positions.insert(n.ident, n.position);
            }

            for (fi, frg) in utg.dovetail_path_mut().iter_mut().enumerate() {
                frg.parent = None;
                frg.a_hang = 0;
                frg.b_hang = 0;
                if fi == 0 {
                    continue;
                }
                let is_earlier = |rid: u32| path_idx.get(&rid).map_or(false, |&i| i < fi);
                if !frg.position.is_reverse() {
                    // forward, the parent hangs off our 5' end
                    let e = bog.best_edge(frg.ident, false);
                    if let Some(p) = e.partner_id().filter(|&p| is_earlier(p)) {
                        frg.parent = Some(p);
                        frg.a_hang = -e.a_hang();
                        frg.b_hang = -e.b_hang();
                    }
                } else {
                    let e = bog.best_edge(frg.ident, true);
                    if let Some(p) = e.partner_id().filter(|&p| is_earlier(p)) {
                        frg.parent = Some(p);
                        frg.a_hang = e.b_hang();
                        frg.b_hang = e.a_hang();
                    }
                }
            }

            for frg in utg.contains_mut().iter_mut() {
                frg.parent = None;
                frg.a_hang = 0;
                frg.b_hang = 0;
                let bc = match bog.best_container(frg.ident) {
                    Some(bc) => bc,
                    None => continue,
                };
                if let Some(cpos) = positions.get(&bc.container()) {
                    frg.parent = Some(bc.container());
                    if cpos.is_reverse() {
                        frg.a_hang = -bc.b_hang();
                        frg.b_hang = -bc.a_hang();
                    } else {
                        frg.a_hang = bc.a_hang();
                        frg.b_hang = bc.b_hang();
                    }
                }
            }
        }
    }

    //
    // splitting
    //

    /// Cut unitig `utg_id` at `breaks`. The pieces replace it and their ids are
    /// returned; nothing changes, and the result is empty, when the cuts leave
    /// a single piece.
    pub fn break_unitig_at(
        &mut self,
        utg_id: u32,
        breaks: &[BreakPoint],
    ) -> Result<Vec<u32>, BogError> {
        let utg = match self.unitig(utg_id) {
            Some(u) => u,
            None => {
                return Err(BogError::Invariant(format!(
                    "break requested in missing unitig {}",
                    utg_id
                )))
            }
        };

        // (5', 3') ends to cut through, per read
        let mut ends = FxHashMap::<u32, (bool, bool)>::default();
        for b in breaks {
            let e = ends.entry(b.frag_end.id).or_insert((false, false));
            if b.frag_end.three_prime {
                e.1 = true;
            } else {
                e.0 = true;
            }
        }

        let mut pieces = Vec::<Vec<DoveTailNode>>::new();
        let mut current = Vec::<DoveTailNode>::new();
        for n in utg.dovetail_path() {
            let (five, three) = ends.get(&n.ident).copied().unwrap_or((false, false));
            let rev = n.position.is_reverse();
            let left = (five && !rev) || (three && rev);
            let right = (three && !rev) || (five && rev);
            match (left, right) {
                (true, true) => {
                    if !current.is_empty() {
                        pieces.push(std::mem::take(&mut current));
                    }
                    pieces.push(vec![*n]);
                }
                (true, false) => {
                    if !current.is_empty() {
                        pieces.push(std::mem::take(&mut current));
                    }
                    current.push(*n);
                }
                (false, true) => {
                    current.push(*n);
                    pieces.push(std::mem::take(&mut current));
                }
                (false, false) => current.push(*n),
            }
        }
        if !current.is_empty() {
            pieces.push(current);
        }

        if pieces.len() < 2 {
            log::info!(
                "unitig {}: {} break points leave a single piece, not split",
                utg_id,
                breaks.len()
            );
            return Ok(Vec::new());
        }

        let mut piece_of = FxHashMap::<u32, usize>::default();
        for (i, p) in pieces.iter().enumerate() {
            for n in p {
                piece_of.insert(n.ident, i);
            }
        }
        let mut contains = vec![Vec::<DoveTailNode>::new(); pieces.len()];
        for n in utg.contains() {
            let pi = match n.contained.and_then(|c| piece_of.get(&c)) {
                Some(&pi) => pi,
                None => {
                    return Err(BogError::Invariant(format!(
                        "contained read {} of unitig {} lost its container {:?}",
                        n.ident, utg_id, n.contained
                    )))
                }
            };
            piece_of.insert(n.ident, pi);
            contains[pi].push(*n);
        }

        let first_id = self.unitigs.len() as u32;
        let mut new_unitigs = Vec::with_capacity(pieces.len());
        for (i, (path, cont)) in pieces.into_iter().zip(contains.into_iter()).enumerate() {
            let offset = match path.first() {
                Some(n) => -n.position.min(),
                None => {
                    return Err(BogError::Invariant(format!(
                        "split of unitig {} made an empty dovetail path",
                        utg_id
                    )))
                }
            };
            let mut piece = Unitig::new(first_id + i as u32);
            for n in path {
                piece.add_frag(n, offset);
            }
            for n in cont {
                piece.add_contained(n, offset);
            }
            new_unitigs.push(piece);
        }

        let mut ids = Vec::with_capacity(new_unitigs.len());
        for piece in new_unitigs {
            for n in piece.dovetail_path().iter().chain(piece.contains().iter()) {
                self.frag_in[n.ident as usize] = Some(piece.id());
            }
            log::debug!(
                "unitig {} piece {}: {} reads, length {}",
                utg_id,
                piece.id(),
                piece.num_frags(),
                piece.length()
            );
            ids.push(piece.id());
            self.unitigs.push(Some(piece));
        }
        self.unitigs[utg_id as usize] = None;
        log::info!("unitig {} split into {:?}", utg_id, ids);
        Ok(ids)
    }
}
