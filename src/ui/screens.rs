//! Backing state for the interactive pieces of the front end: the card-grid
//! cursor and the search overlay. Both only track positions; every value they
//! display comes from the controller.

/// Number of watch cards shown in each row of the grid. Four columns keep
/// names and blurbs legible on most terminal sizes.
pub(crate) const GRID_COLUMNS: usize = 4;

/// Cursor over the windowed card grid.
pub(crate) struct GridView {
    pub(crate) selected: usize,
}

impl GridView {
    pub(crate) fn new() -> Self {
        Self { selected: 0 }
    }

    /// Move within the current row.
    pub(crate) fn move_horizontal(&mut self, offset: isize, len: usize) {
        self.move_selection(offset, len);
    }

    /// Move a whole row up or down.
    pub(crate) fn move_vertical(&mut self, offset: isize, len: usize) {
        self.move_selection(offset * GRID_COLUMNS as isize, len);
    }

    pub(crate) fn select_first(&mut self, len: usize) {
        if len > 0 {
            self.selected = 0;
        }
    }

    pub(crate) fn select_last(&mut self, len: usize) {
        if len > 0 {
            self.selected = len - 1;
        }
    }

    /// Clamp the cursor after the window shrinks or grows.
    pub(crate) fn ensure_in_bounds(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    fn move_selection(&mut self, offset: isize, len: usize) {
        if len == 0 {
            return;
        }
        let last = len as isize - 1;
        let mut new = self.selected as isize + offset;
        if new < 0 {
            new = 0;
        }
        if new > last {
            new = last;
        }
        self.selected = new as usize;
    }
}

/// State for the search overlay. The term itself lives in the controller;
/// this only tracks which suggestion is highlighted, `None` meaning the bare
/// input line.
pub(crate) struct SearchBox {
    pub(crate) cursor: Option<usize>,
}

impl SearchBox {
    pub(crate) fn new() -> Self {
        Self { cursor: None }
    }

    /// Step the highlight through the suggestion list. Moving above the
    /// first entry returns focus to the input line.
    pub(crate) fn move_cursor(&mut self, offset: isize, len: usize) {
        if len == 0 {
            self.cursor = None;
            return;
        }
        let current = self.cursor.map(|c| c as isize).unwrap_or(-1);
        let mut new = current + offset;
        if new < -1 {
            new = -1;
        }
        let last = len as isize - 1;
        if new > last {
            new = last;
        }
        self.cursor = if new < 0 { None } else { Some(new as usize) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_cursor_clamps_at_both_ends() {
        let mut grid = GridView::new();
        grid.move_horizontal(-1, 10);
        assert_eq!(grid.selected, 0);
        grid.move_vertical(1, 10);
        assert_eq!(grid.selected, GRID_COLUMNS);
        grid.move_vertical(5, 10);
        assert_eq!(grid.selected, 9);
        grid.ensure_in_bounds(3);
        assert_eq!(grid.selected, 2);
    }

    #[test]
    fn suggestion_cursor_returns_to_the_input_line() {
        let mut search = SearchBox::new();
        search.move_cursor(1, 3);
        assert_eq!(search.cursor, Some(0));
        search.move_cursor(-1, 3);
        assert_eq!(search.cursor, None);
        search.move_cursor(10, 3);
        assert_eq!(search.cursor, Some(2));
        search.move_cursor(1, 0);
        assert_eq!(search.cursor, None);
    }
}
