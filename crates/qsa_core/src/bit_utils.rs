pub struct BitScatter;

impl BitScatter {
    /// Deposits the low bits of `value` into the set-bit positions of
    /// `mask`, lowest mask bit first.
    #[inline(always)]
    pub fn deposit(value: u32, mask: u32) -> u32 {
        let mut result = 0;
        let mut v = value;
        let mut m = mask;
        while m != 0 {
            let bit = m & m.wrapping_neg();
            if v & 1 != 0 {
                result |= bit;
            }
            v >>= 1;
            m &= m - 1;
        }
        result
    }

    /// Gathers the bits of `value` at the set-bit positions of `mask` into
    /// a dense low-order field, lowest mask bit first.
    #[inline(always)]
    pub fn extract(value: u32, mask: u32) -> u32 {
        let mut result = 0;
        let mut out_bit = 0;
        let mut m = mask;
        while m != 0 {
            let bit = m & m.wrapping_neg();
            if value & bit != 0 {
                result |= 1 << out_bit;
            }
            out_bit += 1;
            m &= m - 1;
        }
        result
    }
}
