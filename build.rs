use std::env;
use std::f64::consts::{E, LN_2, PI};
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

const Q32: f64 = (1i64 << 32) as _;

fn q32(x: f64) -> i64 {
    (x * Q32).round() as i64
}

fn write_cordic_tables() {
    const CIRCULAR_DEPTH: i32 = 15;
    const HYPERBOLIC_DEPTH: i32 = 14;

    let out_dir = env::var_os("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("cordic_tables.rs");
    let mut file = File::create(dest_path).unwrap();

    // Circular microrotations in degrees
    let gain = (0..CIRCULAR_DEPTH).fold(1.0, |f, i| f * (1.0 + 0.25f64.powi(i)).sqrt());
    writeln!(
        file,
        "/// Gain of cordic in circular mode.\npub const CORDIC_CIRCULAR_GAIN: f64 = {};",
        gain
    )
    .unwrap();
    writeln!(
        file,
        "pub(crate) const CORDIC_CIRCULAR_SCALE: i64 = {};",
        q32(gain.recip())
    )
    .unwrap();
    writeln!(
        file,
        "pub(crate) const CORDIC_CIRCULAR: [i64; {CIRCULAR_DEPTH}] = {:?};",
        (0..CIRCULAR_DEPTH)
            .map(|i| q32(0.5f64.powi(i).atan().to_degrees()))
            .collect::<Vec<i64>>()
    )
    .unwrap();

    // Hyperbolic starts at i = 1 and repeats i = 4, 13, 40, ...
    let mut f = 1.0f64;
    let mut range = 0.0f64;
    let mut k = 4;
    for i in 1..=HYPERBOLIC_DEPTH {
        let r = if i == k {
            k = 3 * i + 1;
            2
        } else {
            1
        };
        for _ in 0..r {
            f *= (1.0 - 0.25f64.powi(i)).sqrt();
            range += 0.5f64.powi(i).atanh();
        }
    }
    writeln!(
        file,
        "/// Gain of cordic in hyperbolic mode.\npub const CORDIC_HYPERBOLIC_GAIN: f64 = {};",
        f
    )
    .unwrap();
    writeln!(
        file,
        "pub(crate) const CORDIC_HYPERBOLIC_SCALE: i64 = {};",
        q32(f.recip())
    )
    .unwrap();
    writeln!(
        file,
        "pub(crate) const CORDIC_HYPERBOLIC_RANGE: i64 = {};",
        q32(range)
    )
    .unwrap();
    writeln!(
        file,
        "pub(crate) const CORDIC_HYPERBOLIC: [i64; {HYPERBOLIC_DEPTH}] = {:?};",
        (0..HYPERBOLIC_DEPTH)
            .map(|i| q32(0.5f64.powi(i + 1).atanh()))
            .collect::<Vec<i64>>()
    )
    .unwrap();

    writeln!(file, "pub(crate) const EULER: i64 = {};", q32(E)).unwrap();
    writeln!(file, "pub(crate) const EULER_INV: i64 = {};", q32(E.recip())).unwrap();
    writeln!(file, "pub(crate) const LN_2: i64 = {};", q32(LN_2)).unwrap();
    writeln!(
        file,
        "pub(crate) const DEGREES_PER_RADIAN: i64 = {};",
        q32(180.0 / PI)
    )
    .unwrap();
}

fn write_fft_tables() {
    const DEPTH: i32 = 21;

    let out_dir = env::var_os("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("fft_tables.rs");
    let mut file = File::create(dest_path).unwrap();

    // Stage seeds for the twiddle recurrence: pi, pi/2, pi/4, ...
    writeln!(file, "pub(crate) const TWIDDLE_DEPTH: usize = {DEPTH};").unwrap();
    writeln!(
        file,
        "pub(crate) const TWIDDLE_COS: [i64; TWIDDLE_DEPTH] = {:?};",
        (0..DEPTH)
            .map(|k| q32((PI / (1u64 << k) as f64).cos()))
            .collect::<Vec<i64>>()
    )
    .unwrap();
    writeln!(
        file,
        "pub(crate) const TWIDDLE_SIN: [i64; TWIDDLE_DEPTH] = {:?};",
        (0..DEPTH)
            .map(|k| q32((PI / (1u64 << k) as f64).sin()))
            .collect::<Vec<i64>>()
    )
    .unwrap();
}

fn main() {
    write_cordic_tables();
    write_fft_tables();
    println!("cargo:rerun-if-changed=build.rs");
}
