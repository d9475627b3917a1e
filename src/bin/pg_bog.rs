// Peregrine Assembler and SHIMMER Genome Assembly Toolkit
// 2019, 2020, 2021- (c) by Jason, Chen-Shan, Chin
//
// This Source Code Form is subject to the terms of the
// Creative Commons Attribution-NonCommercial-ShareAlike 4.0 International License.
//
// You should have received a copy of the license along with this
// work. If not, see <http://creativecommons.org/licenses/by-nc-sa/4.0/>.

const VERSION_STRING: &'static str = env!("VERSION_STRING");

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::clap_app;
use simple_logger::SimpleLogger;
use std::str::FromStr;

mod utils;
use utils::bog_runner::run_bog;
use utils::error::BogError;
use utils::overlap::OverlapFiles;
use utils::read_catalog::ReadCatalog;
use utils::{getrusage, log_resource, rusage, BogParameters, MaybeUninit, RUSAGE_SELF};

fn arg_or<T: FromStr>(matches: &clap::ArgMatches, name: &str, default: T) -> Result<T, BogError> {
    match matches.value_of(name) {
        None => Ok(default),
        Some(v) => v
            .parse::<T>()
            .map_err(|_| BogError::Config(format!("bad value for {}: {}", name, v))),
    }
}

fn main() -> Result<(), BogError> {
    let mut rdata: rusage = unsafe { MaybeUninit::zeroed().assume_init() };
    let _res = unsafe { getrusage(RUSAGE_SELF, &mut rdata) };

    let matches = clap_app!(pg_bog =>
        (version: VERSION_STRING)
        (author: "Jason Chin <jason@omnibio.ai>")
        (about: "
Peregrine-2021 genome assembler
pg_bog: build unitigs from the best overlap graph, breaking them at intersections and bad mates
LICENSE: http://creativecommons.org/licenses/by-nc-sa/4.0/")
        (@arg catalog: +required "Path to the read catalog, one `R id length library mate|-` line per read")
        (@arg overlaps: +required "Glob pattern of the overlap files, plain text or .gz")
        (@arg out_prefix: +required "The prefix of the output files")
        (@arg erate: -e --erate +takes_value "Corrected error rate cutoff [default: 0.015]")
        (@arg elimit: --elimit +takes_value "Number of errors allowed when the error rate fails, 0 disables [default: 0]")
        (@arg max_orig_erate: --max_orig_erate +takes_value "Ceiling on the original error rate [default: 0.06]")
        (@arg min_break_frags: --min_break_frags +takes_value "Fewest reads a piece may keep after a break [default: 1]")
        (@arg min_break_length: --min_break_length +takes_value "Shortest piece a break may leave [default: 500]")
        (@arg break_policy: --break_policy +takes_value "How competing breaks are thinned: spacing or arrival [default: spacing]")
        (@arg cluster_window: --cluster_window +takes_value "Breaks closer than this are one break [default: 50]")
        (@arg bad_mate_stddev: --bad_mate_stddev +takes_value "Standard deviations from the mean for a mate to be bad [default: 5]")
        (@arg peak_threshold: --peak_threshold +takes_value +allow_hyphen_values "Bad mate coverage that starts a peak [default: -3]")
        (@arg frg_count_target: --frg_count_target +takes_value "Reads per partition, 0 for a single partition [default: 0]")
        (@arg no_intersection_breaking: --no_intersection_breaking "do not break unitigs at intersections")
        (@arg no_mate_checking: --no_mate_checking "do not break unitigs at bad mates")
        (@arg symmetrize: --symmetrize "the overlap files list every overlap once, add the mirror")
        (@arg log: --log +takes_value "log level: DBBUG or INFO (default)")
    ).get_matches();

    let log_level = match matches.value_of("log").unwrap_or("INFO") {
        "DEBUG" => log::LevelFilter::Debug,
        _ => log::LevelFilter::Info,
    };

    SimpleLogger::new()
        .with_level(log_level)
        .with_utc_timestamps()
        .init()
        .unwrap();

    let catalog_file = matches.value_of("catalog").unwrap().to_string();
    let overlaps = matches.value_of("overlaps").unwrap().to_string();
    let out_prefix = matches.value_of("out_prefix").unwrap().to_string();

    let d = BogParameters::default();
    let parameters = BogParameters {
        erate: arg_or(&matches, "erate", d.erate)?,
        elimit: arg_or(&matches, "elimit", d.elimit)?,
        max_orig_erate: arg_or(&matches, "max_orig_erate", d.max_orig_erate)?,
        min_break_frags: arg_or(&matches, "min_break_frags", d.min_break_frags)?,
        min_break_length: arg_or(&matches, "min_break_length", d.min_break_length)?,
        break_policy: arg_or(&matches, "break_policy", d.break_policy)?,
        break_cluster_window: arg_or(&matches, "cluster_window", d.break_cluster_window)?,
        bad_mate_stddev: arg_or(&matches, "bad_mate_stddev", d.bad_mate_stddev)?,
        peak_threshold: arg_or(&matches, "peak_threshold", d.peak_threshold)?,
        intersection_breaking: !matches.is_present("no_intersection_breaking"),
        mate_checking: !matches.is_present("no_mate_checking"),
        frg_count_target: arg_or(&matches, "frg_count_target", d.frg_count_target)?,
    };
    parameters.validate()?;

    log::info!("pg_bog {}", VERSION_STRING);
    log::info!("catalog: {}", catalog_file);
    log::info!("overlaps: {}", overlaps);
    log::info!("output prefix: {}", out_prefix);
    log::info!("parameters: {:?}", parameters);

    log_resource("BGN: pg_bog", &mut rdata);

    let catalog = ReadCatalog::load(&catalog_file)?;
    log::info!(
        "{} reads, {} bases in the catalog",
        catalog.num_reads(),
        catalog.total_bases()
    );
    let mut source = OverlapFiles::new(&overlaps, matches.is_present("symmetrize"))?;
    log::info!("{} overlap files", source.num_files());

    let res = run_bog(&catalog, &mut source, &parameters, Some(&out_prefix), &mut rdata)?;
    log::info!("{} unitigs", res.graph.num_unitigs());

    log_resource("END: pg_bog", &mut rdata);
    Ok(())
}
