// Copyright 2026 the Reeltime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dry run of the time-matched player over one local day.
//!
//! Reads a metadata document, ticks a [`MatchScheduler`] once per second from
//! local midnight to the next local midnight in New York (23 or 25 hours on
//! DST change days) and prints every cue through a
//! [`PrettyPrintSink`](reeltime_debug::pretty::PrettyPrintSink). With
//! `--json`, the run is also recorded and exported.
//!
//! ```text
//! cargo run -p schedule_preview -- video_metadata.json --date 2024-03-10
//! ```

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime, TimeDelta, Utc};
use clap::{Parser, ValueEnum};
use reeltime_core::record::parse_records;
use reeltime_core::schedule::{MatchScheduler, RefreshPolicy, SchedulerConfig};
use reeltime_core::trace::{CueEvent, RecordsLoadedEvent, TickEvent, TraceSink};
use reeltime_core::zone::{ClockFormat, HourCycle};
use reeltime_debug::export::export_json;
use reeltime_debug::pretty::PrettyPrintSink;
use reeltime_debug::recorder::RecorderSink;

#[derive(Debug, Parser)]
#[command(about = "Print the clips a day of time-matched playback would cue")]
struct Args {
    /// Metadata document (JSON array of `{video, creation_date}` objects).
    metadata: PathBuf,

    /// Local date to simulate, `YYYY-MM-DD`. Defaults to today in New York.
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Hour rendering of the clock.
    #[arg(long = "hour-cycle", value_enum, default_value_t = Cycle::H24)]
    hour_cycle: Cycle,

    /// Skipped seconds still matched by a late tick.
    #[arg(long = "catch-up", default_value_t = 0)]
    catch_up: u32,

    /// Print a line for every tick, not just cues.
    #[arg(long, short)]
    verbose: bool,

    /// Also write the recorded events to this file as JSON.
    #[arg(long)]
    json: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Cycle {
    H23,
    H24,
}

impl From<Cycle> for HourCycle {
    fn from(cycle: Cycle) -> Self {
        match cycle {
            Cycle::H23 => Self::H23,
            Cycle::H24 => Self::H24,
        }
    }
}

/// Forwards events to the printer and, when exporting, the recorder.
struct Sinks {
    pretty: PrettyPrintSink,
    recorder: Option<RecorderSink>,
}

impl TraceSink for Sinks {
    fn on_tick(&mut self, e: &TickEvent) {
        self.pretty.on_tick(e);
        if let Some(recorder) = &mut self.recorder {
            recorder.on_tick(e);
        }
    }

    fn on_records_loaded(&mut self, e: &RecordsLoadedEvent<'_>) {
        self.pretty.on_records_loaded(e);
        if let Some(recorder) = &mut self.recorder {
            recorder.on_records_loaded(e);
        }
    }

    fn on_cue(&mut self, e: &CueEvent<'_>) {
        self.pretty.on_cue(e);
        if let Some(recorder) = &mut self.recorder {
            recorder.on_cue(e);
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let format = ClockFormat {
        hour_cycle: args.hour_cycle.into(),
        ..ClockFormat::fixed_zone()
    };
    let zone = format.zone;

    let json = std::fs::read_to_string(&args.metadata)?;
    let set = parse_records(&json, &zone)?;

    let date = args.date.unwrap_or_else(|| {
        let now = Utc::now();
        zone.to_local(now)
            .map_or_else(|| now.date_naive(), |local| local.date())
    });
    let start = zone
        .from_local(date.and_time(NaiveTime::MIN))
        .ok_or_else(|| format!("{date} has no local midnight in {}", zone.name()))?;
    let end = date
        .succ_opt()
        .and_then(|next| zone.from_local(next.and_time(NaiveTime::MIN)))
        .unwrap_or(start + TimeDelta::days(1));

    let mut sinks = Sinks {
        pretty: PrettyPrintSink::new(Box::new(std::io::stdout())).quiet_ticks(!args.verbose),
        recorder: args.json.is_some().then(RecorderSink::new),
    };

    let source = args.metadata.display().to_string();
    sinks.on_records_loaded(&RecordsLoadedEvent {
        source: &source,
        count: set.records.len(),
        skipped: set.skipped,
    });

    // The file does not change during a dry run, so load it once.
    let config = SchedulerConfig {
        refresh: RefreshPolicy::IntervalMs(u32::MAX),
        catch_up_limit: args.catch_up,
        ..SchedulerConfig::web()
    };
    let mut scheduler = MatchScheduler::new(config, format);
    scheduler.install(set.records, start);

    let mut now = start;
    let mut cues = 0_usize;
    while now < end {
        let plan = scheduler.tick(now);
        sinks.on_tick(&TickEvent {
            tick_index: plan.tick_index,
            clock: plan.clock,
            hour_cycle: format.hour_cycle,
        });
        for cue in &plan.cues {
            sinks.on_cue(&CueEvent {
                tick_index: plan.tick_index,
                clock: cue.clock,
                hour_cycle: format.hour_cycle,
                locator: &cue.locator,
            });
        }
        cues += plan.cues.len();
        now += TimeDelta::seconds(1);
    }
    println!(
        "{date} ({}): {cues} cues over {} seconds",
        zone.name(),
        (end - start).num_seconds()
    );

    if let (Some(path), Some(recorder)) = (&args.json, sinks.recorder) {
        let mut writer = BufWriter::new(File::create(path)?);
        export_json(recorder.events(), &mut writer)?;
        println!("wrote {}", path.display());
    }
    Ok(())
}
