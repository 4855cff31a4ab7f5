use std::{collections::BTreeMap, fmt};

/// Euclid's algorithm.
#[must_use]
pub fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 { a } else { gcd(b, a % b) }
}

/// The least common multiple of two cycle lengths or orders.
///
/// # Panics
///
/// Panics if either number is zero, since zero has no multiples to share.
#[must_use]
pub fn lcm(a: u64, b: u64) -> u64 {
    assert!(a != 0 && b != 0, "lcm({a}, {b}) is undefined");
    a / gcd(a, b) * b
}

/// The prime factorization of a positive integer, as a map from each prime to
/// its exponent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Factorization(BTreeMap<u64, u32>);

impl Factorization {
    /// The primes and their exponents in ascending order of prime.
    pub fn iter(&self) -> impl Iterator<Item = (u64, u32)> + '_ {
        self.0.iter().map(|(&p, &e)| (p, e))
    }

    /// Multiply the factors back together.
    #[must_use]
    pub fn product(&self) -> u64 {
        self.iter().map(|(p, e)| p.pow(e)).product()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Factorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "1");
        }

        for (i, (prime, exponent)) in self.iter().enumerate() {
            if i != 0 {
                write!(f, " · ")?;
            }
            if exponent == 1 {
                write!(f, "{prime}")?;
            } else {
                write!(f, "{prime}^{exponent}")?;
            }
        }

        Ok(())
    }
}

fn mul_mod(a: u64, b: u64, modulus: u64) -> u64 {
    // The remainder is below `modulus`, which fits in a u64
    (u128::from(a) * u128::from(b) % u128::from(modulus)) as u64
}

fn pow_mod(mut base: u64, mut exp: u64, modulus: u64) -> u64 {
    let mut result = 1;
    base %= modulus;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base, modulus);
        }
        base = mul_mod(base, base, modulus);
        exp >>= 1;
    }
    result
}

/// Deterministic Miller-Rabin. The first twelve primes are enough witnesses
/// for every `u64`.
#[must_use]
pub fn is_prime(n: u64) -> bool {
    const WITNESSES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

    if n < 2 {
        return false;
    }
    if let Some(&p) = WITNESSES.iter().find(|&&p| n % p == 0) {
        return n == p;
    }

    let s = (n - 1).trailing_zeros();
    let d = (n - 1) >> s;
    WITNESSES.iter().all(|&witness| {
        let mut x = pow_mod(witness, d, n);
        if x == 1 || x == n - 1 {
            return true;
        }
        for _ in 1..s {
            x = mul_mod(x, x, n);
            if x == n - 1 {
                return true;
            }
        }
        false
    })
}

/// Factor `n` into primes by trial division, stopping as soon as what is
/// left over is prime. Group orders have small prime factors, so this is
/// quick for them; a large prime cofactor is caught by the primality test
/// instead of dividing all the way up to its square root.
///
/// # Panics
///
/// Panics if `n` is zero.
#[must_use]
pub fn factor(mut n: u64) -> Factorization {
    assert!(n != 0, "zero has no prime factorization");

    let mut factors = BTreeMap::new();

    let mut rest_is_prime = is_prime(n);
    let mut p = 2;
    while !rest_is_prime && p <= n / p {
        if n % p == 0 {
            while n % p == 0 {
                *factors.entry(p).or_insert(0) += 1;
                n /= p;
            }
            rest_is_prime = is_prime(n);
        }
        p += if p == 2 { 1 } else { 2 };
    }

    if n > 1 {
        *factors.entry(n).or_insert(0) += 1;
    }

    Factorization(factors)
}
