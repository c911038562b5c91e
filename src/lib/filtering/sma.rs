use num_traits::{Num, NumAssignOps, NumCast};

/// Simple moving average over the last `SIZE` samples.
pub struct SmaFilter<ItemT, const SIZE: usize> {
    buff: [ItemT; SIZE],
    idx: usize,
    sum: ItemT,
    len: usize,
}
impl<ItemT, const SIZE: usize> SmaFilter<ItemT, SIZE>
where
    ItemT: Num + NumAssignOps + NumCast + core::marker::Copy,
{
    pub fn new() -> SmaFilter<ItemT, SIZE> {
        SmaFilter::default()
    }

    pub fn insert(&mut self, data: ItemT) {
        self.sum += data - self.buff[self.idx];
        self.buff[self.idx] = data;
        self.idx = (self.idx + 1) % SIZE;
        if self.len < SIZE {
            self.len += 1;
        }
    }

    // average of whatever has arrived, up to the last `SIZE` samples
    pub fn partial(&self) -> Option<ItemT> {
        if self.len == 0 {
            None
        } else {
            Some(self.sum / ItemT::from(self.len)?)
        }
    }
}

impl<ItemT, const SIZE: usize> Default for SmaFilter<ItemT, SIZE>
where
    ItemT: Num + NumAssignOps + NumCast + core::marker::Copy,
{
    fn default() -> SmaFilter<ItemT, SIZE> {
        SmaFilter {
            buff: [ItemT::zero(); SIZE],
            idx: 0,
            sum: ItemT::zero(),
            len: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_then_slides() {
        let mut sma = SmaFilter::<f32, 4>::new();
        assert_eq!(sma.partial(), None);
        sma.insert(1.0);
        sma.insert(2.0);
        assert_eq!(sma.partial(), Some(1.5));

        sma.insert(3.0);
        sma.insert(6.0);
        assert_eq!(sma.partial(), Some(3.0));

        // oldest sample drops out
        sma.insert(5.0);
        assert_eq!(sma.partial(), Some(4.0));
    }
}
