use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::{Exp, Normal};
use serde_json::{json, Value};

/// Write a synthetic USGS-style earthquake feed for trying out the viewer.
#[derive(Debug, Parser)]
#[command(name = "generate_sample", about)]
struct Args {
    /// Output GeoJSON path.
    #[arg(short, long, default_value = "data/all_month.geojson")]
    output: PathBuf,

    /// Number of events.
    #[arg(short = 'n', long, default_value_t = 2000)]
    count: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Seismic zones: (name, lon, lat, spread in degrees, typical depth km).
const ZONES: &[(&str, f64, f64, f64, f64)] = &[
    ("Southern California", -117.0, 34.0, 2.0, 8.0),
    ("Alaska Peninsula", -155.0, 58.0, 4.0, 40.0),
    ("Japan Trench", 142.0, 38.0, 3.0, 35.0),
    ("Chile", -71.0, -30.0, 5.0, 50.0),
    ("Indonesia", 120.0, -4.0, 8.0, 60.0),
    ("Mid-Atlantic Ridge", -30.0, 15.0, 10.0, 10.0),
];

/// One month, ending at a fixed instant so output is reproducible.
const END_MS: i64 = 1_700_000_000_000;
const MONTH_MS: f64 = 30.0 * 24.0 * 3600.0 * 1000.0;

/// Random draws for one synthetic feed.
struct QuakeSampler {
    rng: StdRng,
    unit: Normal<f64>,
    /// Gutenberg–Richter with b = 1: magnitude excess is Exp(ln 10).
    excess: Exp<f64>,
}

impl QuakeSampler {
    fn new(seed: u64) -> Result<Self> {
        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            unit: Normal::new(0.0, 1.0).context("unit normal")?,
            excess: Exp::new(std::f64::consts::LN_10).context("magnitude distribution")?,
        })
    }

    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        mean + std_dev * self.unit.sample(&mut self.rng)
    }

    /// Magnitude above `m_min`, capped at 9.5, rounded to hundredths.
    fn magnitude(&mut self, m_min: f64) -> f64 {
        let m = m_min + self.excess.sample(&mut self.rng);
        (m.min(9.5) * 100.0).round() / 100.0
    }
}

fn quake_feature(sampler: &mut QuakeSampler, i: usize) -> Value {
    let (zone, lon0, lat0, spread, depth0) = ZONES[sampler.rng.gen_range(0..ZONES.len())];
    let lon = sampler.gauss(lon0, spread).clamp(-180.0, 180.0);
    let lat = sampler.gauss(lat0, spread / 2.0).clamp(-90.0, 90.0);
    let depth = sampler.gauss(depth0, depth0 / 3.0).max(0.0);
    let time = END_MS - (sampler.rng.gen::<f64>() * MONTH_MS) as i64;
    let id = format!("sx{i:07}");

    // The real feed has a few events without a computed magnitude.
    let mag = if sampler.rng.gen_bool(0.01) {
        Value::Null
    } else {
        json!(sampler.magnitude(0.5))
    };

    json!({
        "type": "Feature",
        "properties": {
            "mag": mag,
            "place": format!("{:.0} km from {zone}", sampler.rng.gen_range(1.0..100.0)),
            "time": time,
            "url": format!("https://example.org/earthquakes/eventpage/{id}"),
        },
        "geometry": {
            "type": "Point",
            "coordinates": [
                (lon * 1e4).round() / 1e4,
                (lat * 1e4).round() / 1e4,
                (depth * 100.0).round() / 100.0,
            ],
        },
        "id": id,
    })
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut sampler = QuakeSampler::new(args.seed)?;

    // Newest first, like the USGS summary feeds.
    let mut features: Vec<Value> = (0..args.count).map(|i| quake_feature(&mut sampler, i)).collect();
    features.sort_by_key(|f| std::cmp::Reverse(f["properties"]["time"].as_i64().unwrap_or(0)));

    let collection = json!({
        "type": "FeatureCollection",
        "metadata": {
            "generated": END_MS,
            "title": "Synthetic Earthquakes, Past Month",
            "count": features.len(),
        },
        "features": features,
    });

    if let Some(dir) = args.output.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating {}", dir.display()))?;
    }
    let text = serde_json::to_string(&collection).context("serializing feed")?;
    std::fs::write(&args.output, text)
        .with_context(|| format!("writing {}", args.output.display()))?;

    println!("Wrote {} events to {}", args.count, args.output.display());
    Ok(())
}
