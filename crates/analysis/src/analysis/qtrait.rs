//! Quantitative-trait summaries.
//!
//! Read-only views over a population returning named metrics. Keys are
//! stable strings so the maps serialize directly to JSON.

use std::collections::BTreeMap;

use qtevo_sim::simulation::Population;

use super::utils::{mean, variance};

/// Trait and fitness moments plus counts of segregating and fixed sites.
///
/// Keys: `mean_trait`, `trait_variance`, `VG`, `VE`, `wbar`,
/// `segregating_selected`, `segregating_neutral`, `fixed_selected`,
/// `max_expl`, `leading_e`, `leading_q`.
///
/// `max_expl` is the largest `2pq e^2` among segregating selected
/// mutations, `leading_e` and `leading_q` the effect and frequency of that
/// mutation (`NaN` when there is none).
pub fn qtrait_pop_props(population: &Population) -> BTreeMap<&'static str, f64> {
    let diploids = population.diploids();
    let phenotypes: Vec<f64> = diploids.iter().map(|d| d.phenotype()).collect();
    let genetic: Vec<f64> = diploids.iter().map(|d| d.genetic_value).collect();
    let environmental: Vec<f64> = diploids.iter().map(|d| d.environmental).collect();
    let fitness: Vec<f64> = diploids.iter().map(|d| d.fitness).collect();

    let two_n = population.two_n() as f64;
    let mutations = population.mutations();
    let counts = population.counts();

    let mut segregating_neutral = 0usize;
    let mut segregating_selected = 0usize;
    let mut max_expl = 0.0;
    let mut leading_e = f64::NAN;
    let mut leading_q = f64::NAN;
    for index in population.segregating() {
        let m = &mutations[index as usize];
        if m.neutral {
            segregating_neutral += 1;
            continue;
        }
        segregating_selected += 1;
        let q = counts[index as usize] as f64 / two_n;
        let expl = 2.0 * q * (1.0 - q) * m.effect * m.effect;
        if leading_q.is_nan() || expl > max_expl {
            max_expl = expl;
            leading_e = m.effect;
            leading_q = q;
        }
    }

    BTreeMap::from([
        ("mean_trait", mean(&phenotypes)),
        ("trait_variance", variance(&phenotypes)),
        ("VG", variance(&genetic)),
        ("VE", variance(&environmental)),
        ("wbar", mean(&fitness)),
        ("segregating_selected", segregating_selected as f64),
        ("segregating_neutral", segregating_neutral as f64),
        ("fixed_selected", population.fixations().count_selected() as f64),
        ("max_expl", max_expl),
        ("leading_e", leading_e),
        ("leading_q", leading_q),
    ])
}

/// Flattened trajectories of tracked selected mutations.
///
/// A trajectory is kept if it spans at least `minsojourn` generations and
/// its peak frequency reaches `minfreq`. Each retained point is one row
/// across the columns `position`, `origin`, `effect`, `generation`,
/// `frequency`. Without tracking every column is empty.
pub fn get_qtrait_traj(population: &Population, minsojourn: usize, minfreq: f64) -> BTreeMap<&'static str, Vec<f64>> {
    let mut position = Vec::new();
    let mut origin = Vec::new();
    let mut effect = Vec::new();
    let mut generation = Vec::new();
    let mut frequency = Vec::new();

    let records = population.trajectories().map_or(&[][..], |t| t.records());
    for record in records
        .iter()
        .filter(|r| r.sojourn() >= minsojourn && r.peak_frequency() >= minfreq)
    {
        for (g, f) in record.points() {
            position.push(record.position);
            origin.push(record.origin_generation as f64);
            effect.push(record.effect);
            generation.push(g as f64);
            frequency.push(f);
        }
    }

    BTreeMap::from([
        ("position", position),
        ("origin", origin),
        ("effect", effect),
        ("generation", generation),
        ("frequency", frequency),
    ])
}

/// Effect size and frequency of every selected mutation still present
/// (fixed ones included), sorted by position.
pub fn qtrait_esize_freq(population: &Population) -> BTreeMap<&'static str, Vec<f64>> {
    let two_n = population.two_n() as f64;
    let mut live: Vec<_> = population
        .mutations()
        .iter()
        .zip(population.counts())
        .filter(|&(m, &c)| c > 0 && !m.neutral)
        .collect();
    live.sort_by(|a, b| a.0.position.total_cmp(&b.0.position));

    BTreeMap::from([
        ("position", live.iter().map(|(m, _)| m.position).collect()),
        ("effect", live.iter().map(|(m, _)| m.effect).collect()),
        ("frequency", live.iter().map(|&(_, &c)| c as f64 / two_n).collect()),
        ("origin", live.iter().map(|(m, _)| m.origin_generation as f64).collect()),
    ])
}
