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
// The best overlap graph: for every read keep the best dovetail overlap
// off each end and the best container. Everything downstream (chunk
// ordering, unitig walks, intersection breaking) only looks at these.
//

use super::error::BogError;
use super::overlap::{Overlap, OverlapSource, ERRBITS, MAX_ERATE_Q};
use super::read_catalog::ReadCatalog;
use super::BogParameters;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use memmap::MmapOptions;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};

pub const NULL_READ: u32 = u32::MAX;
// below this many entries a co-contained list is searched linearly
pub const CO_CONTAINED_SORT_MIN: u32 = 16;

const BEST_FILE_MAGIC: &[u8; 4] = b"BOGE";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReadEnd {
    pub id: u32,
    pub three_prime: bool,
}

impl ReadEnd {
    pub fn new(id: u32, three_prime: bool) -> Self {
        ReadEnd { id, three_prime }
    }
    pub fn five(id: u32) -> Self {
        ReadEnd::new(id, false)
    }
    pub fn three(id: u32) -> Self {
        ReadEnd::new(id, true)
    }
    pub fn opposite(&self) -> Self {
        ReadEnd::new(self.id, !self.three_prime)
    }
}

impl fmt::Display for ReadEnd {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.id, if self.three_prime { "3'" } else { "5'" })
    }
}

/// The best overlap off one end of a read. Hangs are as seen from the owning read.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BestEdge {
    frag_b_id: u32,
    b_three_prime: bool,
    a_hang: i32,
    b_hang: i32,
}

impl Default for BestEdge {
    fn default() -> Self {
        BestEdge {
            frag_b_id: NULL_READ,
            b_three_prime: false,
            a_hang: 0,
            b_hang: 0,
        }
    }
}

impl BestEdge {
    pub fn new(partner: ReadEnd, a_hang: i32, b_hang: i32) -> Self {
        BestEdge {
            frag_b_id: partner.id,
            b_three_prime: partner.three_prime,
            a_hang,
            b_hang,
        }
    }

    #[inline]
    pub fn partner(&self) -> Option<ReadEnd> {
        if self.frag_b_id == NULL_READ {
            None
        } else {
            Some(ReadEnd::new(self.frag_b_id, self.b_three_prime))
        }
    }

    #[inline]
    pub fn partner_id(&self) -> Option<u32> {
        self.partner().map(|p| p.id)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frag_b_id == NULL_READ
    }

    #[inline]
    pub fn a_hang(&self) -> i32 {
        self.a_hang
    }

    #[inline]
    pub fn b_hang(&self) -> i32 {
        self.b_hang
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BestContainment {
    container: u32,
    a_hang: i32,
    b_hang: i32,
    same_orientation: bool,
    olaps_start: u32,
    olaps_len: u32,
}

impl BestContainment {
    pub fn new(container: u32, a_hang: i32, b_hang: i32, same_orientation: bool) -> Self {
        BestContainment {
            container,
            a_hang,
            b_hang,
            same_orientation,
            olaps_start: 0,
            olaps_len: 0,
        }
    }

    #[inline]
    pub fn container(&self) -> u32 {
        self.container
    }
    #[inline]
    pub fn a_hang(&self) -> i32 {
        self.a_hang
    }
    #[inline]
    pub fn b_hang(&self) -> i32 {
        self.b_hang
    }
    #[inline]
    pub fn same_orientation(&self) -> bool {
        self.same_orientation
    }
    #[inline]
    pub fn co_contained_len(&self) -> u32 {
        self.olaps_len
    }
}

#[derive(Debug, Default, Copy, Clone)]
pub struct SelectorStats {
    pub overlaps: usize,
    pub bad_quality: usize,
    pub deleted: usize,
    pub unknown_reads: usize,
    pub self_overlaps: usize,
    pub contained: usize,
    pub co_contained: usize,
    pub dovetail_used: usize,
}

pub struct BestOverlapGraph {
    best5: Vec<BestEdge>,
    best3: Vec<BestEdge>,
    best_c: Vec<Option<BestContainment>>,
    best5_score: Vec<u64>,
    best3_score: Vec<u64>,
    best_c_score: Vec<u64>,
    // co-contained reads for every contained read, see BestContainment::olaps_*
    co_contained: Vec<u32>,
    read_len: Vec<u32>,
    erate: f64,
    elimit: f64,
    mismatch_cutoff: u64,
    consensus_cutoff: u64,
    mismatch_limit: f64,
    pub stats: SelectorStats,
}

/// Length of the overlap on the A read, from the hangs.
pub fn olap_length(alen: u32, a_hang: i32, b_hang: i32) -> u32 {
    let alen = alen as i64;
    let (a_hang, b_hang) = (a_hang as i64, b_hang as i64);
    let aovl = if a_hang < 0 {
        if b_hang < 0 {
            alen + b_hang
        } else {
            alen
        }
    } else if b_hang < 0 {
        alen - a_hang + b_hang
    } else {
        alen - a_hang
    };
    aovl.max(0).min(alen) as u32
}

impl BestOverlapGraph {
    fn empty(num_reads: usize, params: &BogParameters) -> Self {
        BestOverlapGraph {
            best5: vec![BestEdge::default(); num_reads],
            best3: vec![BestEdge::default(); num_reads],
            best_c: vec![None; num_reads],
            best5_score: vec![0; num_reads],
            best3_score: vec![0; num_reads],
            best_c_score: vec![0; num_reads],
            co_contained: Vec::new(),
            read_len: Vec::new(),
            erate: params.erate,
            elimit: params.elimit,
            mismatch_cutoff: super::overlap::encode_quality(params.erate),
            consensus_cutoff: super::overlap::encode_quality(params.max_orig_erate),
            mismatch_limit: params.elimit,
            stats: SelectorStats::default(),
        }
    }

    /// Score the whole overlap stream: one pass for the containments, one for the dovetails.
    pub fn build(
        catalog: &ReadCatalog,
        source: &mut dyn OverlapSource,
        params: &BogParameters,
    ) -> Result<Self, BogError> {
        params.validate()?;
        let n = catalog.num_reads();
        let mut bog = BestOverlapGraph::empty(n, params);
        bog.read_len = (0..n as u32).map(|rid| catalog.length(rid)).collect();

        let mut stats = SelectorStats::default();
        let total = source.for_each_overlap(&mut |o| {
            stats.overlaps += 1;
            if o.a_id as usize >= n || o.b_id as usize >= n {
                stats.unknown_reads += 1;
                return;
            }
            if o.a_id == o.b_id {
                stats.self_overlaps += 1;
                return;
            }
            bog.score_containment(o, &mut stats);
        })?;
        if total == 0 && n > 0 {
            return Err(BogError::Config(format!(
                "the overlap source is empty but there are {} reads",
                n
            )));
        }
        bog.check_containment_cycles()?;

        let mut co_pairs = Vec::<(u32, u32)>::new();
        source.for_each_overlap(&mut |o| {
            if o.a_id as usize >= n || o.b_id as usize >= n || o.a_id == o.b_id {
                return;
            }
            bog.score_edge(o, &mut co_pairs, &mut stats);
        })?;
        stats.contained = bog.best_c.iter().filter(|c| c.is_some()).count();
        stats.co_contained = co_pairs.len();
        bog.build_co_contained(&co_pairs);
        bog.stats = stats;

        if stats.unknown_reads > 0 {
            log::warn!(
                "best overlaps: {} overlaps name reads beyond the catalog and were skipped",
                stats.unknown_reads
            );
        }
        if stats.self_overlaps > 0 {
            log::warn!(
                "best overlaps: {} overlaps of a read with itself were skipped",
                stats.self_overlaps
            );
        }
        log::info!(
            "best overlaps: {} overlaps per pass, {} bad quality, {} with deleted reads, {} contained reads, {} dovetail updates",
            stats.overlaps,
            stats.bad_quality,
            stats.deleted,
            stats.contained,
            stats.dovetail_used
        );
        Ok(bog)
    }

    pub fn num_reads(&self) -> usize {
        self.best5.len()
    }

    fn read_length(&self, rid: u32) -> u32 {
        self.read_len.get(rid as usize).copied().unwrap_or(0)
    }

    //
    // quality and scoring
    //

    fn is_overlap_bad_quality(&self, o: &Overlap) -> bool {
        // never generated at this rate upstream, do not trust it
        if o.orig_q() > self.consensus_cutoff {
            return true;
        }
        if o.corr_q() <= self.mismatch_cutoff {
            return false;
        }
        if self.mismatch_limit <= 0.0 {
            return true;
        }
        let olen = olap_length(self.read_length(o.a_id), o.a_hang, o.b_hang) as f64;
        let nerr = olen * o.corr_erate;
        log::debug!(
            "overlap {} {} fails erate {:.4}, {:.1} mismatches against limit {}",
            o.a_id,
            o.b_id,
            o.corr_erate,
            nerr,
            self.mismatch_limit
        );
        nerr > self.mismatch_limit
    }

    /// Length dominates, then the corrected and the original error rates. Zero means unusable.
    pub fn score_overlap(&self, o: &Overlap) -> u64 {
        if self.is_overlap_bad_quality(o) {
            return 0;
        }
        let corr = (MAX_ERATE_Q - o.corr_q()) << ERRBITS;
        let orig = MAX_ERATE_Q - o.orig_q();
        if o.is_containment() {
            return corr | orig;
        }
        let leng = (olap_length(self.read_length(o.a_id), o.a_hang, o.b_hang) as u64) << (2 * ERRBITS);
        leng | corr | orig
    }

    fn is_deleted_pair(&self, o: &Overlap) -> bool {
        self.read_length(o.a_id) == 0 || self.read_length(o.b_id) == 0
    }

    fn score_containment(&mut self, o: &Overlap, stats: &mut SelectorStats) {
        if self.is_deleted_pair(o) {
            stats.deleted += 1;
            return;
        }
        // no hangs at all, the lower id is the container
        if o.a_hang == 0 && o.b_hang == 0 && o.a_id > o.b_id {
            return;
        }
        // only A contains B is scored, the mirror shows up with A and B swapped
        if !o.a_contains_b() {
            return;
        }
        let new_score = self.score_overlap(o);
        if new_score == 0 {
            stats.bad_quality += 1;
            return;
        }
        let b = o.b_id as usize;
        let replace = match self.best_c[b] {
            None => true,
            Some(c) => {
                new_score > self.best_c_score[b]
                    || (new_score == self.best_c_score[b] && o.a_id < c.container)
            }
        };
        if replace {
            self.best_c[b] = Some(BestContainment::new(o.a_id, o.a_hang, o.b_hang, !o.flipped));
            self.best_c_score[b] = new_score;
        }
    }

    fn score_edge(&mut self, o: &Overlap, co_pairs: &mut Vec<(u32, u32)>, stats: &mut SelectorStats) {
        if self.best_c[o.a_id as usize].is_some() {
            // keep the real edges off contained reads, used to check placements later
            if (o.a_hang < 0 && o.b_hang < 10) || (o.a_hang > 0 && o.b_hang > -10) {
                co_pairs.push((o.a_id, o.b_id));
            }
            return;
        }
        if self.best_c[o.b_id as usize].is_some() {
            return;
        }
        // containments that failed quality in the first pass end up here
        if o.is_containment() {
            return;
        }
        if self.is_deleted_pair(o) {
            return;
        }
        let new_score = self.score_overlap(o);
        if new_score == 0 {
            stats.bad_quality += 1;
            return;
        }

        let a_three_prime = o.a_hang > 0;
        let b_three_prime = if o.a_hang < 0 { !o.flipped } else { o.flipped };
        let a = o.a_id as usize;
        let (slot, score) = if a_three_prime {
            (&mut self.best3[a], &mut self.best3_score[a])
        } else {
            (&mut self.best5[a], &mut self.best5_score[a])
        };
        if new_score > *score || (new_score == *score && o.b_id < slot.frag_b_id) {
            *slot = BestEdge::new(ReadEnd::new(o.b_id, b_three_prime), o.a_hang, o.b_hang);
            *score = new_score;
            stats.dovetail_used += 1;
        }
    }

    fn check_containment_cycles(&self) -> Result<(), BogError> {
        // 0: not seen, 1: on the current chain, 2: chain ends in an uncontained read
        let mut state = vec![0_u8; self.num_reads()];
        let mut chain = Vec::<u32>::new();
        for rid in 0..self.num_reads() {
            if state[rid] != 0 || self.best_c[rid].is_none() {
                continue;
            }
            chain.clear();
            let mut cur = rid as u32;
            loop {
                match state[cur as usize] {
                    1 => {
                        return Err(BogError::Invariant(format!(
                            "containment cycle through read {} (chain {:?})",
                            cur, chain
                        )))
                    }
                    2 => break,
                    _ => {}
                }
                state[cur as usize] = 1;
                chain.push(cur);
                match self.best_c[cur as usize] {
                    Some(c) => cur = c.container,
                    None => break,
                }
            }
            for r in chain.iter() {
                state[*r as usize] = 2;
            }
        }
        Ok(())
    }

    fn build_co_contained(&mut self, co_pairs: &[(u32, u32)]) {
        // count, then fill, into one dense arena
        let n = self.num_reads();
        let mut counts = vec![0_u32; n];
        for &(c, _) in co_pairs {
            counts[c as usize] += 1;
        }
        let mut starts = vec![0_u32; n];
        let mut acc = 0_u32;
        for rid in 0..n {
            starts[rid] = acc;
            acc += counts[rid];
        }
        let mut fill = starts.clone();
        let mut entries = vec![0_u32; co_pairs.len()];
        for &(c, other) in co_pairs {
            let c = c as usize;
            entries[fill[c] as usize] = other;
            fill[c] += 1;
        }
        for rid in 0..n {
            if let Some(bc) = self.best_c[rid].as_mut() {
                bc.olaps_start = starts[rid];
                bc.olaps_len = counts[rid];
                if counts[rid] >= CO_CONTAINED_SORT_MIN {
                    let s = starts[rid] as usize;
                    let e = s + counts[rid] as usize;
                    entries[s..e].sort_unstable();
                }
            }
        }
        self.co_contained = entries;
    }

    //
    // queries
    //

    #[inline]
    pub fn best_edge(&self, rid: u32, three_prime: bool) -> &BestEdge {
        if three_prime {
            &self.best3[rid as usize]
        } else {
            &self.best5[rid as usize]
        }
    }

    #[inline]
    pub fn best_edge_at(&self, end: ReadEnd) -> &BestEdge {
        self.best_edge(end.id, end.three_prime)
    }

    /// Step along the best edge off `end`; the result is the far end of the partner read.
    pub fn follow_overlap(&self, end: ReadEnd) -> Option<ReadEnd> {
        self.best_edge_at(end).partner().map(|p| p.opposite())
    }

    #[inline]
    pub fn is_contained(&self, rid: u32) -> bool {
        self.best_c[rid as usize].is_some()
    }

    #[inline]
    pub fn best_container(&self, rid: u32) -> Option<&BestContainment> {
        self.best_c[rid as usize].as_ref()
    }

    pub fn co_contained(&self, rid: u32) -> &[u32] {
        match self.best_c[rid as usize] {
            Some(c) => {
                let s = c.olaps_start as usize;
                &self.co_contained[s..s + c.olaps_len as usize]
            }
            None => &[],
        }
    }

    /// Does the contained read `contain` also overlap `other`?
    pub fn contain_have_edge_to(&self, contain: u32, other: u32) -> bool {
        let c = match self.best_c[contain as usize] {
            Some(c) => c,
            None => return false,
        };
        let olaps = self.co_contained(contain);
        if c.olaps_len < CO_CONTAINED_SORT_MIN {
            olaps.iter().any(|&r| r == other)
        } else {
            olaps.binary_search(&other).is_ok()
        }
    }

    /// How many reads ride in each uncontained read, following container
    /// chains down to the read at the top.
    pub fn carried_reads(&self) -> Vec<u32> {
        let n = self.num_reads();
        let mut cnt = vec![0_u32; n];
        for rid in 0..n {
            let mut root = match self.best_c[rid] {
                Some(c) => c.container,
                None => continue,
            };
            let mut steps = 0_usize;
            while let Some(c) = self.best_c.get(root as usize).copied().flatten() {
                root = c.container;
                steps += 1;
                if steps > n {
                    break;
                }
            }
            if let Some(v) = cnt.get_mut(root as usize) {
                *v += 1;
            }
        }
        cnt
    }

    //
    // persistence
    //

    fn write_edge<W: Write>(w: &mut W, e: &BestEdge, score: u64) -> Result<(), io::Error> {
        w.write_u32::<LittleEndian>(e.frag_b_id)?;
        w.write_u8(e.b_three_prime as u8)?;
        w.write_i32::<LittleEndian>(e.a_hang)?;
        w.write_i32::<LittleEndian>(e.b_hang)?;
        w.write_u64::<LittleEndian>(score)?;
        Ok(())
    }

    fn read_edge(r: &mut &[u8]) -> Result<(BestEdge, u64), io::Error> {
        let frag_b_id = r.read_u32::<LittleEndian>()?;
        let b_three_prime = r.read_u8()? != 0;
        let a_hang = r.read_i32::<LittleEndian>()?;
        let b_hang = r.read_i32::<LittleEndian>()?;
        let score = r.read_u64::<LittleEndian>()?;
        Ok((
            BestEdge {
                frag_b_id,
                b_three_prime,
                a_hang,
                b_hang,
            },
            score,
        ))
    }

    pub fn best_file_name(prefix: &str) -> String {
        format!("{}.best.dat", prefix)
    }

    /// Dump the best edges and containments so a rerun with the same (erate, elimit) can skip scoring.
    pub fn save(&self, prefix: &str) -> Result<(), BogError> {
        let filename = Self::best_file_name(prefix);
        let mut out_f = BufWriter::new(File::create(&filename)?);
        out_f.write_all(BEST_FILE_MAGIC)?;
        out_f.write_f64::<LittleEndian>(self.erate)?;
        out_f.write_f64::<LittleEndian>(self.elimit)?;
        out_f.write_u64::<LittleEndian>(self.num_reads() as u64)?;
        out_f.write_u64::<LittleEndian>(self.co_contained.len() as u64)?;
        for rid in 0..self.num_reads() {
            Self::write_edge(&mut out_f, &self.best5[rid], self.best5_score[rid])?;
            Self::write_edge(&mut out_f, &self.best3[rid], self.best3_score[rid])?;
            let c = self.best_c[rid];
            let bc = c.unwrap_or_else(|| BestContainment::new(NULL_READ, 0, 0, false));
            out_f.write_u8(c.is_some() as u8)?;
            out_f.write_u32::<LittleEndian>(bc.container)?;
            out_f.write_i32::<LittleEndian>(bc.a_hang)?;
            out_f.write_i32::<LittleEndian>(bc.b_hang)?;
            out_f.write_u8(bc.same_orientation as u8)?;
            out_f.write_u32::<LittleEndian>(bc.olaps_start)?;
            out_f.write_u32::<LittleEndian>(bc.olaps_len)?;
            out_f.write_u64::<LittleEndian>(self.best_c_score[rid])?;
            out_f.write_u32::<LittleEndian>(self.read_len[rid])?;
        }
        for r in self.co_contained.iter() {
            out_f.write_u32::<LittleEndian>(*r)?;
        }
        out_f.flush()?;
        log::info!("best overlaps saved to {}", filename);
        Ok(())
    }

    /// Returns None if there is no saved file for this prefix or it was made with other thresholds.
    pub fn load(
        prefix: &str,
        catalog: &ReadCatalog,
        params: &BogParameters,
    ) -> Result<Option<Self>, BogError> {
        let filename = Self::best_file_name(prefix);
        let file = match File::open(&filename) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mmap = unsafe { MmapOptions::new().map(&file)? };
        let mut r: &[u8] = &mmap[..];

        if r.len() < 4 || &r[..4] != BEST_FILE_MAGIC {
            log::warn!("{} is not a best overlap file, ignored", filename);
            return Ok(None);
        }
        r = &r[4..];
        let erate = r.read_f64::<LittleEndian>()?;
        let elimit = r.read_f64::<LittleEndian>()?;
        let n = r.read_u64::<LittleEndian>()? as usize;
        let n_co = r.read_u64::<LittleEndian>()? as usize;
        if erate.to_bits() != params.erate.to_bits() || elimit.to_bits() != params.elimit.to_bits() {
            log::info!(
                "{} was made with erate {} elimit {}, not {} {}; rescoring",
                filename,
                erate,
                elimit,
                params.erate,
                params.elimit
            );
            return Ok(None);
        }
        if n != catalog.num_reads() {
            log::info!(
                "{} has {} reads but the catalog has {}; rescoring",
                filename,
                n,
                catalog.num_reads()
            );
            return Ok(None);
        }

        let mut bog = BestOverlapGraph::empty(n, params);
        bog.read_len = vec![0; n];
        for rid in 0..n {
            let (e5, s5) = Self::read_edge(&mut r)?;
            let (e3, s3) = Self::read_edge(&mut r)?;
            bog.best5[rid] = e5;
            bog.best5_score[rid] = s5;
            bog.best3[rid] = e3;
            bog.best3_score[rid] = s3;
            let is_contained = r.read_u8()? != 0;
            let container = r.read_u32::<LittleEndian>()?;
            let a_hang = r.read_i32::<LittleEndian>()?;
            let b_hang = r.read_i32::<LittleEndian>()?;
            let same_orientation = r.read_u8()? != 0;
            let olaps_start = r.read_u32::<LittleEndian>()?;
            let olaps_len = r.read_u32::<LittleEndian>()?;
            bog.best_c_score[rid] = r.read_u64::<LittleEndian>()?;
            bog.read_len[rid] = r.read_u32::<LittleEndian>()?;
            if is_contained {
                bog.best_c[rid] = Some(BestContainment {
                    container,
                    a_hang,
                    b_hang,
                    same_orientation,
                    olaps_start,
                    olaps_len,
                });
            }
        }
        let mut co = Vec::<u32>::with_capacity(n_co.min(r.len() / 4));
        for _ in 0..n_co {
            co.push(r.read_u32::<LittleEndian>()?);
        }
        if let Some(rid) = bog.first_bad_index(n_co) {
            log::warn!("{} is corrupt at read {}, ignored", filename, rid);
            return Ok(None);
        }
        bog.co_contained = co;
        bog.stats.contained = bog.best_c.iter().filter(|c| c.is_some()).count();
        bog.stats.co_contained = n_co;
        log::info!("best overlaps loaded from {}", filename);
        Ok(Some(bog))
    }

    // ids and co-contained ranges of a loaded graph must stay inside it
    fn first_bad_index(&self, n_co: usize) -> Option<usize> {
        let n = self.num_reads();
        let bad_edge = |e: &BestEdge| !e.is_empty() && e.frag_b_id as usize >= n;
        (0..n).find(|&rid| {
            let bad_c = match self.best_c[rid] {
                Some(c) => {
                    c.container as usize >= n
                        || c.olaps_start as usize + c.olaps_len as usize > n_co
                }
                None => false,
            };
            bad_c || bad_edge(&self.best5[rid]) || bad_edge(&self.best3[rid])
        })
    }

    pub fn dump_best_edges(&self, prefix: &str) -> Result<(), BogError> {
        let fmt_edge = |e: &BestEdge| match e.partner() {
            Some(p) => format!("{} {}", p.id, if p.three_prime { "3'" } else { "5'" }),
            None => "- -".to_string(),
        };

        let filename = format!("{}.best.edges", prefix);
        let mut out_f = BufWriter::new(File::create(&filename)?);
        writeln!(out_f, "#fragId fragLen best5 end best3 end")?;
        for rid in 0..self.num_reads() {
            if self.best_c[rid].is_some() || self.read_len[rid] == 0 {
                continue;
            }
            writeln!(
                out_f,
                "{} {} {} {}",
                rid,
                self.read_len[rid],
                fmt_edge(&self.best5[rid]),
                fmt_edge(&self.best3[rid])
            )?;
        }
        out_f.flush()?;

        let filename = format!("{}.best.contains", prefix);
        let mut out_f = BufWriter::new(File::create(&filename)?);
        writeln!(out_f, "#fragId fragLen container sameOrient a_hang b_hang")?;
        for rid in 0..self.num_reads() {
            if let Some(c) = self.best_c[rid] {
                writeln!(
                    out_f,
                    "{} {} {} {} {} {}",
                    rid,
                    self.read_len[rid],
                    c.container,
                    if c.same_orientation { "Y" } else { "N" },
                    c.a_hang,
                    c.b_hang
                )?;
            }
        }
        out_f.flush()?;
        Ok(())
    }
}
