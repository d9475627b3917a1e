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

mod utils;
use utils::bog_runner::{best_overlaps, check_memory};
use utils::error::BogError;
use utils::overlap::OverlapFiles;
use utils::read_catalog::ReadCatalog;
use utils::{getrusage, log_resource, rusage, BogParameters, MaybeUninit, RUSAGE_SELF};

fn main() -> Result<(), BogError> {
    let mut rdata: rusage = unsafe { MaybeUninit::zeroed().assume_init() };
    let _res = unsafe { getrusage(RUSAGE_SELF, &mut rdata) };

    let matches = clap_app!(pg_bog_edges =>
        (version: VERSION_STRING)
        (author: "Jason Chin <jason@omnibio.ai>")
        (about: "
Peregrine-2021 genome assembler
pg_bog_edges: pick the best overlaps of every read and dump them
LICENSE: http://creativecommons.org/licenses/by-nc-sa/4.0/")
        (@arg catalog: +required "Path to the read catalog")
        (@arg overlaps: +required "Glob pattern of the overlap files, plain text or .gz")
        (@arg out_prefix: +required "The prefix of the output files")
        (@arg erate: -e --erate +takes_value "Corrected error rate cutoff [default: 0.015]")
        (@arg elimit: --elimit +takes_value "Number of errors allowed when the error rate fails, 0 disables [default: 0]")
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

    let mut parameters = BogParameters::default();
    if let Some(v) = matches.value_of("erate") {
        parameters.erate = v
            .parse::<f64>()
            .map_err(|_| BogError::Config(format!("bad erate: {}", v)))?;
    }
    if let Some(v) = matches.value_of("elimit") {
        parameters.elimit = v
            .parse::<f64>()
            .map_err(|_| BogError::Config(format!("bad elimit: {}", v)))?;
    }
    parameters.validate()?;

    log_resource("BGN: pg_bog_edges", &mut rdata);
    let catalog = ReadCatalog::load(&catalog_file)?;
    check_memory(&catalog);
    let mut source = OverlapFiles::new(&overlaps, matches.is_present("symmetrize"))?;
    let bog = best_overlaps(&catalog, &mut source, &parameters, Some(&out_prefix), &mut rdata)?;
    log::info!("selector stats: {:?}", bog.stats);
    log_resource("END: pg_bog_edges", &mut rdata);
    Ok(())
}
