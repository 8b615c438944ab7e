use core::hint::black_box;

use iai_callgrind::{library_benchmark, library_benchmark_group, main};

use cordic_fft::{Complex, Q32, Rounding, atan2, exp, fft_unchecked, ifft_unchecked, ln, sin};

type Q = Q32<16>;

#[library_benchmark]
#[bench::some(Q::from_f64(-123.456))]
fn bench_sin(theta: Q) -> Q {
    black_box(sin(theta))
}

#[library_benchmark]
#[bench::some(Q::from_f64(-0.3), Q::from_f64(0.7))]
fn bench_atan2(y: Q, x: Q) -> Q {
    black_box(atan2(y, x).unwrap())
}

#[library_benchmark]
#[bench::some(Q::from_f64(2.5))]
fn bench_exp_ln(v: Q) -> Q {
    black_box(ln(exp(v).unwrap()).unwrap())
}

library_benchmark_group!(
    name = bench_cordic_group;
    benchmarks = bench_sin, bench_atan2, bench_exp_ln
);

fn signal(n: usize) -> Vec<Complex<Q>> {
    (0..n)
        .map(|i| Complex::new(Q::new((i as i32 * 0x1234) & 0xffff), Q::new(0)))
        .collect()
}

#[library_benchmark]
#[bench::n256(signal(256))]
#[bench::n1024(signal(1024))]
fn bench_fft(mut x: Vec<Complex<Q>>) -> Vec<Complex<Q>> {
    fft_unchecked(black_box(&mut x));
    x
}

#[library_benchmark]
#[bench::n256(signal(256))]
fn bench_ifft(mut x: Vec<Complex<Q>>) -> Vec<Complex<Q>> {
    ifft_unchecked(black_box(&mut x), Rounding::Nearest);
    x
}

library_benchmark_group!(
    name = bench_fft_group;
    benchmarks = bench_fft, bench_ifft
);

main!(library_benchmark_groups = bench_cordic_group, bench_fft_group);
