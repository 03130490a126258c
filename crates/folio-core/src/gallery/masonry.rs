//! Masonry layout: tiles are dropped, in document order, into whichever
//! column run currently ends highest, so columns stay roughly even.

/// Layout engine settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MasonryOptions {
    /// Width of one column in pixels.
    pub column_width: f64,
    /// Horizontal space between columns and vertical space below each tile.
    pub gutter: f64,
    /// Shrink the container to the columns in use; the stylesheet centres it.
    pub fit_width: bool,
}

/// Input to one layout pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutTile {
    pub width: f64,
    pub height: f64,
    pub visible: bool,
}

/// Position of one visible tile, relative to the fitted container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Index into the tiles passed to [`MasonryLayout::layout`].
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub column: usize,
    pub span: usize,
}

/// Result of one layout pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
    pub placements: Vec<Placement>,
    pub columns: usize,
    /// Container width after fitting.
    pub width: f64,
    pub height: f64,
}

impl Layout {
    pub fn placement(&self, index: usize) -> Option<&Placement> {
        self.placements.iter().find(|p| p.index == index)
    }
}

#[derive(Clone, Debug)]
pub struct MasonryLayout {
    options: MasonryOptions,
    current: Layout,
    passes: usize,
}

impl MasonryLayout {
    pub fn new(options: MasonryOptions) -> Self {
        Self {
            options,
            current: Layout::default(),
            passes: 0,
        }
    }

    pub fn options(&self) -> &MasonryOptions {
        &self.options
    }

    /// Most recent layout.
    pub fn current(&self) -> &Layout {
        &self.current
    }

    /// Number of layout passes run so far.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Lay out the visible tiles inside a container `container_width` wide.
    /// Hidden tiles take no space.
    pub fn layout(&mut self, container_width: f64, tiles: &[LayoutTile]) -> &Layout {
        self.passes += 1;

        let gutter = self.options.gutter.max(0.0);
        let step = (self.options.column_width + gutter).max(1.0);
        let columns = (((container_width + gutter) / step).floor() as usize).max(1);
        let mut col_ys = vec![0.0f64; columns];
        let mut placements = Vec::new();

        for (index, tile) in tiles.iter().enumerate() {
            if !tile.visible {
                continue;
            }
            let span = (((tile.width + gutter) / step).ceil() as usize).clamp(1, columns);

            // leftmost run whose tallest column is lowest
            let (column, y) = (0..=columns - span)
                .map(|start| {
                    let top = col_ys[start..start + span]
                        .iter()
                        .copied()
                        .fold(0.0f64, f64::max);
                    (start, top)
                })
                .fold((0usize, f64::INFINITY), |best, cand| {
                    if cand.1 < best.1 {
                        cand
                    } else {
                        best
                    }
                });

            let bottom = y + tile.height + gutter;
            for col in &mut col_ys[column..column + span] {
                *col = bottom;
            }
            placements.push(Placement {
                index,
                x: column as f64 * step,
                y,
                column,
                span,
            });
        }

        let height = col_ys.iter().copied().fold(0.0f64, f64::max);
        let used = if self.options.fit_width {
            let unused = col_ys.iter().rev().take_while(|&&y| y == 0.0).count();
            (columns - unused).max(1)
        } else {
            columns
        };
        let width = (used as f64 * step - gutter).max(0.0);
        self.current = Layout {
            placements,
            columns,
            width,
            height,
        };
        &self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> MasonryOptions {
        MasonryOptions {
            column_width: 100.0,
            gutter: 10.0,
            fit_width: true,
        }
    }

    fn tile(width: f64, height: f64) -> LayoutTile {
        LayoutTile {
            width,
            height,
            visible: true,
        }
    }

    #[test]
    fn column_count_includes_gutter() {
        let mut m = MasonryLayout::new(opts());
        // (330 + 10) / 110 = 3.09 -> 3 columns
        let layout = m.layout(330.0, &[tile(100.0, 50.0)]);
        assert_eq!(layout.columns, 3);
    }

    #[test]
    fn tiles_fill_shortest_column() {
        let mut m = MasonryLayout::new(opts());
        let tiles = [
            tile(100.0, 200.0),
            tile(100.0, 50.0),
            tile(100.0, 50.0),
        ];
        let layout = m.layout(210.0, &tiles).clone();
        assert_eq!(layout.columns, 2);
        assert_eq!((layout.placements[0].x, layout.placements[0].y), (0.0, 0.0));
        assert_eq!((layout.placements[1].x, layout.placements[1].y), (110.0, 0.0));
        // second column ends at 60, first at 210
        assert_eq!((layout.placements[2].x, layout.placements[2].y), (110.0, 60.0));
        assert_eq!(layout.height, 210.0);
    }

    #[test]
    fn featured_tile_spans_two_columns() {
        let mut m = MasonryLayout::new(opts());
        let tiles = [tile(100.0, 30.0), tile(200.0, 100.0)];
        let layout = m.layout(320.0, &tiles);
        let featured = layout.placement(1).unwrap();
        assert_eq!(featured.span, 2);
        // columns 1-2 are empty, so it sits beside the first tile
        assert_eq!((featured.column, featured.y), (1, 0.0));
    }

    #[test]
    fn hidden_tiles_take_no_space() {
        let mut m = MasonryLayout::new(opts());
        let tiles = [
            LayoutTile {
                width: 100.0,
                height: 500.0,
                visible: false,
            },
            tile(100.0, 50.0),
        ];
        let layout = m.layout(210.0, &tiles);
        assert_eq!(layout.placements.len(), 1);
        assert_eq!(layout.placements[0].index, 1);
        assert_eq!((layout.placements[0].x, layout.placements[0].y), (0.0, 0.0));
    }

    #[test]
    fn fit_width_shrinks_to_used_columns() {
        let mut m = MasonryLayout::new(opts());
        let layout = m.layout(430.0, &[tile(100.0, 50.0)]);
        assert_eq!(layout.columns, 4);
        assert_eq!(layout.width, 100.0);
    }

    #[test]
    fn narrow_container_still_has_one_column() {
        let mut m = MasonryLayout::new(opts());
        let layout = m.layout(50.0, &[tile(50.0, 20.0), tile(200.0, 20.0)]);
        assert_eq!(layout.columns, 1);
        assert!(layout.placements.iter().all(|p| p.span == 1 && p.x == 0.0));
        assert_eq!(layout.placements[1].y, 30.0);
    }

    #[test]
    fn counts_passes() {
        let mut m = MasonryLayout::new(opts());
        m.layout(300.0, &[]);
        m.layout(300.0, &[]);
        assert_eq!(m.passes(), 2);
    }
}
