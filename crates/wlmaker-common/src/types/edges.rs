bitflags::bitflags! {
    /// Screen or window edges. Used for resize edges, layer anchors and
    /// hot corners.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct Edges: u32 {
        const TOP = 1;
        const BOTTOM = 2;
        const LEFT = 4;
        const RIGHT = 8;
    }
}

impl Edges {
    /// True for exactly one vertical plus one horizontal edge.
    pub fn is_corner(&self) -> bool {
        let vertical = self.intersection(Edges::TOP | Edges::BOTTOM);
        let horizontal = self.intersection(Edges::LEFT | Edges::RIGHT);
        vertical.bits().count_ones() == 1 && horizontal.bits().count_ones() == 1
    }

    /// Parse a `|`-separated list such as `"top|left"`. Case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        let mut edges = Edges::empty();
        for part in s.split('|').map(str::trim).filter(|p| !p.is_empty()) {
            edges |= match part.to_ascii_lowercase().as_str() {
                "top" => Edges::TOP,
                "bottom" => Edges::BOTTOM,
                "left" => Edges::LEFT,
                "right" => Edges::RIGHT,
                _ => return None,
            };
        }
        Some(edges)
    }
}
