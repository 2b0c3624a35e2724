//! Writes `data-x3jzk.csv`, a synthetic job exposure table for trying the
//! dashboard without the real dataset. Some cells are wrapped in stray quotes
//! or padded, and a few scores are not numeric, so the loader's cleaning
//! rules are visible in the UI.

use anyhow::{Context, Result};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Major group, typical average score, job titles.
const GROUPS: [(&str, f64, &[&str]); 5] = [
    (
        "Clerical support workers",
        0.68,
        &[
            "Data entry clerks",
            "Typists and word processing operators",
            "Accounting and bookkeeping clerks",
            "Payroll clerks",
            "Receptionists (general)",
            "Filing and copying clerks",
        ],
    ),
    (
        "Professionals",
        0.42,
        &[
            "Financial analysts",
            "Software developers",
            "Translators and interpreters",
            "Journalists",
            "Statisticians",
        ],
    ),
    (
        "Technicians and associate professionals",
        0.45,
        &[
            "Statistical and finance clerks",
            "Bank tellers",
            "Medical records technicians",
            "Insurance representatives",
        ],
    ),
    (
        "Service and sales workers",
        0.28,
        &["Shop sales assistants", "Cooks", "Hairdressers", "Travel guides"],
    ),
    (
        "Craft and related trades workers",
        0.15,
        &["Carpenters", "Electricians", "Plumbers", "Bakers"],
    ),
];

fn exposure_level(score: f64, sd: f64) -> &'static str {
    match score {
        s if s >= 0.6 && sd < 0.2 => "Highest exposure, low task variability (gradient 4)",
        s if s >= 0.5 => "High exposure (gradient 3)",
        s if s >= 0.4 => "Moderate exposure (gradient 2)",
        s if s >= 0.3 => "Low exposure (gradient 1)",
        s if s >= 0.2 => "Minimal exposure",
        _ => "Not exposed",
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let output_path = "data-x3jzk.csv";

    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record([
        "Major groups",
        "Job title",
        "mean_exposure_level",
        "Average score",
        "Standard deviation",
    ])?;

    let mut rows = 0usize;
    let mut malformed = 0usize;

    for (group, base, titles) in GROUPS {
        for title in titles {
            let score = rng.gauss(base, 0.08).clamp(0.0, 1.0);
            let sd = rng.gauss(0.15, 0.04).clamp(0.01, 0.4);
            let level = exposure_level(score, sd);

            // Sprinkle in the artifacts the loader has to clean up.
            let roll = rng.next_f64();
            let title_cell = if roll < 0.15 {
                format!("\"{title}\"")
            } else if roll < 0.3 {
                format!("  {title} ")
            } else {
                title.to_string()
            };
            let score_cell = if roll > 0.93 {
                malformed += 1;
                "n/a".to_string()
            } else {
                format!("{score:.4}")
            };

            writer.write_record([
                group.to_string(),
                title_cell,
                level.to_string(),
                score_cell,
                format!("{sd:.4}"),
            ])?;
            rows += 1;
        }
    }

    writer.flush().context("flushing CSV")?;

    println!("Wrote {rows} job titles ({malformed} with non-numeric scores) to {output_path}");
    Ok(())
}
