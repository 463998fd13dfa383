use rand::Rng;

/// Synthetic transaction receipt.
///
/// The mock settlement backend has no chain behind it; these fields exist so
/// the API shape already matches a future on-chain backend. The values are
/// random and carry no meaning.
#[derive(Debug, Clone)]
pub struct TxReceipt {
    pub tx_hash: String,
    pub block_number: u64,
}

pub fn synthetic_receipt() -> TxReceipt {
    let mut rng = rand::thread_rng();
    let bytes: [u8; 32] = rng.r#gen();
    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    TxReceipt {
        tx_hash: format!("0x{hex}"),
        block_number: rng.gen_range(1_000_000..100_000_000),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_hash_format() {
        let receipt = synthetic_receipt();
        assert!(receipt.tx_hash.starts_with("0x"));
        assert_eq!(receipt.tx_hash.len(), 66);
        assert!(
            receipt.tx_hash[2..]
                .chars()
                .all(|c| c.is_ascii_hexdigit())
        );
    }

    #[test]
    fn test_receipt_block_number_in_range() {
        let receipt = synthetic_receipt();
        assert!(receipt.block_number >= 1_000_000);
        assert!(receipt.block_number < 100_000_000);
    }
}
