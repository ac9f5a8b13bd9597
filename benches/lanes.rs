mod util;
use util::core_cycles;

use gfsbox::lanes::{self, Lanes, Portable, Word};

const LEN: usize = 1024;

fn mkbuf(z: u64, k: u64) -> [u64; LEN] {
    let mut x = [0u64; LEN];
    for i in 0..LEN {
        x[i] = z.wrapping_mul(2 * (i as u64) + k);
    }
    x
}

// Add and subtract over LEN words with unit U; cost is reported per word.
fn bench_add_sub<U: lanes::VectorUnit<u64>>(name: &str) {
    let z = core_cycles();
    let mut x = mkbuf(z, 1);
    let mut y = mkbuf(z, 3);
    let mut f = [false; LEN];
    let mut tt = [0; 10];
    for i in 0..10 {
        let begin = core_cycles();
        for _ in 0..10 {
            let (a, b) = (x, y);
            let _ = Lanes::<U>::add(&a, &b, &mut x, &mut f);
            let _ = Lanes::<U>::subtract(&a, &b, &mut y, &mut f);
        }
        let end = core_cycles();
        tt[i] = end.wrapping_sub(begin);
    }
    tt.sort();
    println!("{:<22}{:11.2}  ({})", name,
        (tt[4] as f64) / (20.0 * LEN as f64), (x[0] ^ y[0]) as u8);
}

fn bench_shifts() {
    let z = core_cycles();
    let mut x = mkbuf(z, 1);
    let mut c = [0u64; LEN];
    for i in 0..LEN {
        c[i] = (i as u64) & 63;
    }
    let mut tt = [0; 10];
    for i in 0..10 {
        let begin = core_cycles();
        for _ in 0..10 {
            x = lanes::shift_left(&x, &c);
            x = lanes::shift_right(&x, &c);
        }
        let end = core_cycles();
        tt[i] = end.wrapping_sub(begin);
    }
    tt.sort();
    println!("shifts (native):      {:11.2}  ({})",
        (tt[4] as f64) / (20.0 * LEN as f64), x[1] as u8);
}

fn main() {
    bench_add_sub::<Portable<128>>("add/sub (128-bit):");
    bench_add_sub::<Portable<256>>("add/sub (256-bit):");
    bench_add_sub::<Portable<512>>("add/sub (512-bit):");
    bench_add_sub::<<u64 as Word>::Native>("add/sub (native):");
    bench_shifts();
}
