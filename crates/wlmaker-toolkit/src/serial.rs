/// Monotonic protocol serials. Zero is never handed out.
#[derive(Debug, Default)]
pub struct Serials {
    last: u32,
}

impl Serials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self) -> u32 {
        self.last = self.last.wrapping_add(1);
        if self.last == 0 {
            self.last = 1;
        }
        self.last
    }

    pub fn last(&self) -> u32 {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serials_increase() {
        let mut s = Serials::new();
        let a = s.next();
        let b = s.next();
        assert!(b > a);
        assert_eq!(s.last(), b);
    }

    #[test]
    fn zero_is_skipped_on_wrap() {
        let mut s = Serials { last: u32::MAX };
        assert_eq!(s.next(), 1);
    }
}
