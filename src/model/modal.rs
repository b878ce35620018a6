//! Modal stack for overlays drawn above the grid
//!
//! Only the top modal receives input.

/// A modal overlay
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// Quit confirmation dialog
    QuitConfirm,
    /// Data source menu; index 0 is the "no source" entry
    SourcePicker { selected_index: usize },
    /// Column visibility checklist
    ColumnPicker { selected_index: usize },
    /// Keyboard shortcuts
    Help { scroll_offset: usize },
}

impl Modal {
    /// Move the cursor of list-style modals by `delta`, bounded by `len`
    pub fn move_selection(&mut self, delta: isize, len: usize) {
        match self {
            Modal::SourcePicker { selected_index } | Modal::ColumnPicker { selected_index } => {
                if len == 0 {
                    *selected_index = 0;
                    return;
                }
                let next = (*selected_index as isize + delta).clamp(0, len as isize - 1);
                *selected_index = next as usize;
            }
            Modal::Help { scroll_offset } => {
                let next = (*scroll_offset as isize + delta).max(0);
                *scroll_offset = next as usize;
            }
            Modal::QuitConfirm => {}
        }
    }
}

/// A stack of modal overlays, rendered bottom to top
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Modal> {
        self.stack.last_mut()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}
