//! Cashaddr encoding for the forked-chain display format.
//!
//! Encodes a legacy 160-bit hash as the `bitcoincash:` address form:
//! a lowercase prefix, a 5-bit payload in the bech32-style charset, and
//! a 40-bit BCH polymod checksum computed over prefix and payload.

/// The canonical network prefix for mainnet cash addresses.
pub const PREFIX: &str = "bitcoincash";

const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// The script kind carried in the cashaddr version byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashKind {
    P2pkh,
    P2sh,
}

impl HashKind {
    /// Version byte: type bits shifted over the size bits, which are
    /// zero for a 160-bit hash.
    fn version_byte(&self) -> u8 {
        match self {
            Self::P2pkh => 0x00,
            Self::P2sh => 0x08,
        }
    }
}

/// The 40-bit BCH checksum over 5-bit symbols.
fn polymod(values: &[u8]) -> u64 {
    let mut c: u64 = 1;
    for &d in values {
        let c0 = (c >> 35) as u8;
        c = ((c & 0x0007_ffff_ffff) << 5) ^ u64::from(d);
        if c0 & 0x01 != 0 {
            c ^= 0x98_f2bc_8e61;
        }
        if c0 & 0x02 != 0 {
            c ^= 0x79_b76d_99e2;
        }
        if c0 & 0x04 != 0 {
            c ^= 0xf3_3e5f_b3c4;
        }
        if c0 & 0x08 != 0 {
            c ^= 0xae_2eab_e2a8;
        }
        if c0 & 0x10 != 0 {
            c ^= 0x1e_4f43_e470;
        }
    }
    c ^ 1
}

/// Regroups 8-bit bytes into zero-padded 5-bit symbols.
fn to_five_bit(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() * 8 / 5 + 1);
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    for &byte in data {
        acc = (acc << 8) | u32::from(byte);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(((acc >> bits) & 0x1f) as u8);
        }
    }
    if bits > 0 {
        out.push(((acc << (5 - bits)) & 0x1f) as u8);
    }
    out
}

/// Encodes a 160-bit hash as a prefixed cash address.
pub fn encode(kind: HashKind, hash: &[u8; 20]) -> String {
    let mut payload = Vec::with_capacity(21);
    payload.push(kind.version_byte());
    payload.extend_from_slice(hash);
    let payload = to_five_bit(&payload);

    // checksum input: prefix (low 5 bits of each char), separator,
    // payload, then 8 zeros standing in for the checksum itself
    let mut checksum_input: Vec<u8> = PREFIX.bytes().map(|b| b & 0x1f).collect();
    checksum_input.push(0);
    checksum_input.extend_from_slice(&payload);
    checksum_input.extend_from_slice(&[0; 8]);
    let checksum = polymod(&checksum_input);

    let mut addr = String::with_capacity(PREFIX.len() + 1 + payload.len() + 8);
    addr.push_str(PREFIX);
    addr.push(':');
    for &symbol in &payload {
        addr.push(CHARSET[symbol as usize] as char);
    }
    for i in (0..8).rev() {
        let symbol = ((checksum >> (i * 5)) & 0x1f) as usize;
        addr.push(CHARSET[symbol] as char);
    }
    addr
}

#[cfg(test)]
mod tests {
    use super::*;

    // hash160 payloads of the reference legacy addresses, checked
    // against the bchaddrjs translation table
    fn hash_of(legacy: &str) -> [u8; 20] {
        let decoded = bs58::decode(legacy).with_check(None).into_vec().unwrap();
        decoded[1..21].try_into().unwrap()
    }

    #[test]
    fn test_p2pkh_reference_vectors() {
        assert_eq!(
            encode(HashKind::P2pkh, &hash_of("1BpEi6DfDAUFd7GtittLSdBeYJvcoaVggu")),
            "bitcoincash:qpm2qsznhks23z7629mms6s4cwef74vcwvy22gdx6a"
        );
        assert_eq!(
            encode(HashKind::P2pkh, &hash_of("1KXrWXciRDZUpQwQmuM1DbwsKDLYAYsVLR")),
            "bitcoincash:qr95sy3j9xwd2ap32xkykttr4cvcu7as4y0qverfuy"
        );
        assert_eq!(
            encode(HashKind::P2pkh, &hash_of("16w1D5WRVKJuZUsSRzdLp9w3YGcgoxDXb")),
            "bitcoincash:qqq3728yw0y47sqn6l2na30mcw6zm78dzqre909m2r"
        );
    }

    #[test]
    fn test_p2sh_reference_vector() {
        assert_eq!(
            encode(HashKind::P2sh, &hash_of("3CWFddi6m4ndiGyKqzYvsFYagqDLPVMTzC")),
            "bitcoincash:ppm2qsznhks23z7629mms6s4cwef74vcwvn0h829pq"
        );
    }

    #[test]
    fn test_encode_is_deterministic() {
        let hash = hash_of("1BpEi6DfDAUFd7GtittLSdBeYJvcoaVggu");
        assert_eq!(encode(HashKind::P2pkh, &hash), encode(HashKind::P2pkh, &hash));
    }
}
