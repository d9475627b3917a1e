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
// the stages from overlaps to written unitigs
//

use super::best_overlap::BestOverlapGraph;
use super::chunk_graph::ChunkGraph;
use super::error::BogError;
use super::intersect::IntersectionResolver;
use super::layout;
use super::mate_checker::MateChecker;
use super::overlap::OverlapSource;
use super::read_catalog::ReadCatalog;
use super::unitig_graph::UnitigGraph;
use super::{log_resource, rusage, BogParameters};
use sysinfo::SystemExt;

// rough bytes held per read: two best edges, a containment, scores, membership
const BYTES_PER_READ: u64 = 96;

pub struct BogResult {
    pub bog: BestOverlapGraph,
    pub graph: UnitigGraph,
}

pub fn check_memory(catalog: &ReadCatalog) {
    let system = sysinfo::System::new_all();
    log::info!("sys: total memory: {} KB", system.total_memory());
    log::info!("sys: used memory: {} KB", system.used_memory());
    let free_mem = system.total_memory().saturating_sub(system.used_memory());
    let need = (catalog.num_reads() as u64 * BYTES_PER_READ) >> 10;
    if (free_mem as f64) < (need as f64 * 1.5) {
        log::warn!("free memory is less than 1.5 x the estimated need of {} KB", need);
        log::warn!("the run may be slow or crash");
    }
}

/// Best edges from the cache under `prefix` when its thresholds match, scored
/// from the overlaps otherwise.
pub fn best_overlaps(
    catalog: &ReadCatalog,
    source: &mut dyn OverlapSource,
    params: &BogParameters,
    prefix: Option<&str>,
    rdata: &mut rusage,
) -> Result<BestOverlapGraph, BogError> {
    log_resource("BGN: best overlaps", rdata);
    let cached = match prefix {
        Some(p) => BestOverlapGraph::load(p, catalog, params)?,
        None => None,
    };
    let bog = match cached {
        Some(bog) => {
            log::info!("best overlaps loaded from {}", BestOverlapGraph::best_file_name(prefix.unwrap_or("")));
            bog
        }
        None => {
            let bog = BestOverlapGraph::build(catalog, source, params)?;
            if let Some(p) = prefix {
                bog.save(p)?;
            }
            bog
        }
    };
    if let Some(p) = prefix {
        bog.dump_best_edges(p)?;
    }
    log_resource("END: best overlaps", rdata);
    Ok(bog)
}

pub fn run_bog(
    catalog: &ReadCatalog,
    source: &mut dyn OverlapSource,
    params: &BogParameters,
    prefix: Option<&str>,
    rdata: &mut rusage,
) -> Result<BogResult, BogError> {
    params.validate()?;
    check_memory(catalog);

    let bog = best_overlaps(catalog, source, params, prefix, rdata)?;

    log_resource("BGN: chunk graph", rdata);
    let chunk = ChunkGraph::new(&bog, catalog);
    log_resource("END: chunk graph", rdata);

    log_resource("BGN: build unitigs", rdata);
    let mut graph = UnitigGraph::new(catalog.num_reads());
    graph.build_dovetail_paths(&bog, catalog, &chunk);
    log_resource("END: build unitigs", rdata);

    if params.intersection_breaking {
        log_resource("BGN: break intersections", rdata);
        let mut resolver = IntersectionResolver::new(&bog, params, prefix)?;
        resolver.resolve(&mut graph)?;
        log_resource("END: break intersections", rdata);
    }

    log_resource("BGN: place contained reads", rdata);
    graph.place_contains(&bog, catalog);
    graph.recover_zombies(catalog);
    graph.check_unitig_membership(catalog)?;
    log_resource("END: place contained reads", rdata);

    if params.mate_checking {
        log_resource("BGN: mate checks", rdata);
        let mut checker = MateChecker::new(catalog, params);
        checker.run(&mut graph)?;
        graph.check_unitig_membership(catalog)?;
        log_resource("END: mate checks", rdata);
    }

    graph.set_parent_and_hang(&bog);

    if let Some(p) = prefix {
        log_resource("BGN: write unitigs", rdata);
        layout::write_unitigs(&graph, p, params.frg_count_target)?;
        layout::write_unused_best_edges(&graph, &bog, p)?;
        log_resource("END: write unitigs", rdata);
    }

    Ok(BogResult { bog, graph })
}

#[cfg(test)]
mod tests {
    use super::super::overlap::Overlap;
    use super::super::read_catalog::ReadInfo;
    use super::super::test_utils::*;
    use super::super::{getrusage, MaybeUninit, RUSAGE_SELF};
    use super::*;

    fn rdata() -> rusage {
        let mut r: rusage = unsafe { MaybeUninit::zeroed().assume_init() };
        let _res = unsafe { getrusage(RUSAGE_SELF, &mut r) };
        r
    }

    #[test]
    fn whole_pipeline_places_every_read() {
        // A-B-C, D hitting B, E contained in C, F with no overlaps
        let catalog = ReadCatalog::from_reads(vec![
            ReadInfo::new(1000, 0, None),
            ReadInfo::new(1000, 0, None),
            ReadInfo::new(1000, 0, None),
            ReadInfo::new(1000, 0, None),
            ReadInfo::new(300, 0, None),
            ReadInfo::new(900, 0, None),
        ]);
        let mut ovlps = chain_overlaps(&[0, 1, 2], 1000, 500);
        ovlps.push(Overlap::new(3, 1, 700, 700, true, 0.01));
        ovlps.push(Overlap::new(2, 4, 200, -500, false, 0.01));
        let mut ovlps = symmetric(ovlps);
        let mut r = rdata();
        let res = run_bog(&catalog, &mut ovlps, &params(), None, &mut r).unwrap();

        assert_eq!(res.graph.num_unitigs(), 4);
        assert!(res.graph.check_unitig_membership(&catalog).is_ok());
        let c_utg = res.graph.unitig(res.graph.frag_in(2).unwrap()).unwrap();
        assert_eq!(res.graph.frag_in(4), Some(c_utg.id()));
        assert_eq!(c_utg.contains()[0].parent, Some(2));
        let f_utg = res.graph.unitig(res.graph.frag_in(5).unwrap()).unwrap();
        assert_eq!(path_ids(f_utg), vec![5]);
        assert_eq!(f_utg.length(), 900);
    }

    #[test]
    fn cache_is_reused() {
        let catalog = catalog_of(&[1000, 1000, 1000]);
        let prefix = std::env::temp_dir()
            .join(format!("bog_runner_{}", std::process::id()))
            .to_string_lossy()
            .to_string();
        let mut ovlps = symmetric(chain_overlaps(&[0, 1, 2], 1000, 500));
        let mut r = rdata();
        let first = run_bog(&catalog, &mut ovlps, &params(), Some(&prefix), &mut r).unwrap();

        // the cache stands in for an overlap source that has nothing left
        let mut empty: Vec<Overlap> = Vec::new();
        let second = run_bog(&catalog, &mut empty, &params(), Some(&prefix), &mut r).unwrap();
        assert_eq!(
            path_ids(first.graph.unitigs().next().unwrap()),
            path_ids(second.graph.unitigs().next().unwrap())
        );
        let utg = std::fs::read_to_string(format!("{}_utg.dat", prefix)).unwrap();
        assert!(utg.starts_with("U 0 2000 3\n"));

        for ext in [
            ".best.dat",
            ".best.edges",
            ".best.contains",
            ".breaks",
            "_utg.dat",
            ".iidmap",
            ".partitioning",
            ".partitioningInfo",
            ".unused.best",
        ]
        .iter()
        {
            let _ = std::fs::remove_file(format!("{}{}", prefix, ext));
        }
    }
}
