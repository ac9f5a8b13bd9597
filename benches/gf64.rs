mod util;
use util::core_cycles;

use gfsbox::field::{GF64, mont_mul};
use gfsbox::sbox::{self, STATE_WIDTH};

fn bench_gf64_add() {
    let z = core_cycles();
    let mut x = GF64::from_u64(z);
    let mut y = x + GF64::ONE;
    let mut tt = [0; 10];
    for i in 0..10 {
        let begin = core_cycles();
        for _ in 0..1000 {
            x += y;
            y += x;
            x += y;
            y += x;
            x += y;
            y += x;
        }
        let end = core_cycles();
        tt[i] = end.wrapping_sub(begin);
    }
    tt.sort();
    println!("GF64 add:             {:11.2}  ({})", (tt[4] as f64) / 6000.0, x.encode()[0]);
}

fn bench_gf64_mul() {
    let z = core_cycles();
    let mut x = GF64::from_u64(z);
    let mut y = x + GF64::ONE;
    let mut tt = [0; 10];
    for i in 0..10 {
        let begin = core_cycles();
        for _ in 0..1000 {
            x *= y;
            y *= x;
            x *= y;
            y *= x;
            x *= y;
            y *= x;
        }
        let end = core_cycles();
        tt[i] = end.wrapping_sub(begin);
    }
    tt.sort();
    println!("GF64 mul:             {:11.2}  ({})", (tt[4] as f64) / 6000.0, x.encode()[0]);
}

fn bench_gf64_mont_mul() {
    let z = core_cycles();
    let mut x = z % gfsbox::field::P;
    let mut y = x ^ 1;
    let mut tt = [0; 10];
    for i in 0..10 {
        let begin = core_cycles();
        for _ in 0..1000 {
            x = mont_mul(x, y);
            y = mont_mul(y, x);
            x = mont_mul(x, y);
            y = mont_mul(y, x);
            x = mont_mul(x, y);
            y = mont_mul(y, x);
        }
        let end = core_cycles();
        tt[i] = end.wrapping_sub(begin);
    }
    tt.sort();
    println!("mont_mul (raw):       {:11.2}  ({})", (tt[4] as f64) / 6000.0, x as u8);
}

fn bench_gf64_square() {
    let z = core_cycles();
    let mut x = GF64::from_u64(z);
    let mut tt = [0; 10];
    for i in 0..10 {
        let begin = core_cycles();
        x.set_xsquare(1000);
        let end = core_cycles();
        tt[i] = end.wrapping_sub(begin);
    }
    tt.sort();
    println!("GF64 square:          {:11.2}  ({})", (tt[4] as f64) / 1000.0, x.encode()[0]);
}

fn bench_gf64_invert() {
    let z = core_cycles();
    let mut x = GF64::from_u64(z);
    let mut tt = [0; 10];
    for i in 0..10 {
        let begin = core_cycles();
        for _ in 0..1000 {
            x.set_invert();
            x += GF64::ONE;
        }
        let end = core_cycles();
        tt[i] = end.wrapping_sub(begin);
    }
    tt.sort();
    println!("GF64 invert:          {:11.2}  ({})", (tt[4] as f64) / 1000.0, x.encode()[0]);
}

fn bench_gf64_batch_invert() {
    let z = core_cycles();
    let mut xx = [GF64::ZERO; 200];
    for i in 0..xx.len() {
        xx[i] = GF64::from_u64(z.wrapping_add(i as u64));
    }
    let mut tt = [0; 10];
    for i in 0..10 {
        let begin = core_cycles();
        for _ in 0..10 {
            GF64::batch_invert(&mut xx);
        }
        let end = core_cycles();
        tt[i] = end.wrapping_sub(begin);
    }
    tt.sort();
    println!("GF64 batch_invert:    {:11.2}  ({})", (tt[4] as f64) / 2000.0, xx[0].encode()[0]);
}

fn mkstate(z: u64) -> [GF64; STATE_WIDTH] {
    let mut s = [GF64::ZERO; STATE_WIDTH];
    for i in 0..STATE_WIDTH {
        s[i] = GF64::from_u64(z.wrapping_mul(2 * (i as u64) + 1));
    }
    s
}

fn bench_sbox() {
    let mut s = mkstate(core_cycles());
    let mut tt = [0; 10];
    for i in 0..10 {
        let begin = core_cycles();
        for _ in 0..1000 {
            sbox::apply_sbox(&mut s);
        }
        let end = core_cycles();
        tt[i] = end.wrapping_sub(begin);
    }
    tt.sort();
    println!("sbox (x^7, 12 lanes): {:11.2}  ({})", (tt[4] as f64) / 1000.0, s[0].encode()[0]);
}

fn bench_inv_sbox() {
    let mut s = mkstate(core_cycles());
    let mut tt = [0; 10];
    for i in 0..10 {
        let begin = core_cycles();
        for _ in 0..100 {
            sbox::apply_inv_sbox(&mut s);
        }
        let end = core_cycles();
        tt[i] = end.wrapping_sub(begin);
    }
    tt.sort();
    println!("inv sbox (12 lanes):  {:11.2}  ({})", (tt[4] as f64) / 100.0, s[0].encode()[0]);
}

fn main() {
    bench_gf64_add();
    bench_gf64_mul();
    bench_gf64_mont_mul();
    bench_gf64_square();
    bench_gf64_invert();
    bench_gf64_batch_invert();
    bench_sbox();
    bench_inv_sbox();
}
