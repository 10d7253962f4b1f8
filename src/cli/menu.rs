// ============================================================
// Layer 1 — Menu Selections
// ============================================================
// Maps the single-letter selections to commands. Matching is
// case-insensitive and ignores surrounding whitespace.

/// The menu as shown to the user
pub const MENU: &str = "\
(F) Cursor Forward
(B) Cursor Backward
(I) Insert Car After Cursor
(R) Remove Car At Cursor
(L) Set Product Load
(S) Search For Product
(T) Display Train
(M) Display Manifest
(D) Remove Dangerous Cars
(Q) Quit
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Forward,
    Backward,
    Insert,
    Remove,
    SetLoad,
    Search,
    ShowTrain,
    ShowManifest,
    RemoveDangerous,
    Quit,
}

impl MenuCommand {
    /// `None` for anything that isn't on the menu
    pub fn parse(selection: &str) -> Option<Self> {
        let cmd = match selection.trim().to_ascii_uppercase().as_str() {
            "F" => MenuCommand::Forward,
            "B" => MenuCommand::Backward,
            "I" => MenuCommand::Insert,
            "R" => MenuCommand::Remove,
            "L" => MenuCommand::SetLoad,
            "S" => MenuCommand::Search,
            "T" => MenuCommand::ShowTrain,
            "M" => MenuCommand::ShowManifest,
            "D" => MenuCommand::RemoveDangerous,
            "Q" => MenuCommand::Quit,
            _   => return None,
        };
        Some(cmd)
    }
}
