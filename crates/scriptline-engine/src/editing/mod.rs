/*!
 * # Screenplay Editing Core
 *
 * A line-oriented structured editor: the screenplay is an ordered list of
 * [`Line`]s, each carrying a [`Classification`] (scene heading, action,
 * character, dialogue, ...) and plain text.
 *
 * ## Architecture Overview
 *
 * ### 1. Single Owned State
 * - The [`Editor`] exclusively owns the [`Document`], the focus state and the
 *   current [`PageBreakSet`]
 * - Consumers get owned [`Snapshot`]s, never a live view
 *
 * ### 2. Command-Based Editing
 * - Every change is a [`Cmd`]; structural keys ([`EditorKey`]) compile to
 *   commands against the active line
 * - Commands run to completion one at a time and return a [`Patch`]
 *
 * ### 3. One-Directional Focus Sync
 * - The active index is the only source of truth for the class indicator
 * - Outward: notifications through the injected [`RenderSurface`]
 * - Inward: the external selector sends [`Cmd::SetClassFromExternal`]
 *
 * ### 4. Paint-Driven Pagination
 * - The painter reports line heights as [`Geometry`] via [`Editor::paint`]
 * - Breaks are recomputed only after the document changed, and the surface
 *   hears about them only when they differ
 *
 * ## Module Structure
 *
 * - **`classification`**: classes, split rules and the reclassify cycle
 * - **`document`**: `Document` and `Line` with index-checked mutation
 * - **`commands`**: `Cmd`, `EditorKey` and command execution
 * - **`focus`**: active line, caret requests and indicator state
 * - **`pagination`**: geometry and page break computation
 * - **`editor`**: the `Editor` tying the pieces together
 * - **`snapshot`** / **`patch`**: values handed to callers
 */

pub mod classification;
pub mod commands;
pub mod document;
pub mod editor;
pub mod focus;
pub mod pagination;
pub mod patch;
pub mod snapshot;
pub mod surface;

pub use classification::{Classification, RECLASSIFY_CYCLE, UnknownClassification};
pub use commands::{Cmd, EditorKey, KeyOutcome};
pub use document::{Document, EditError, Line};
pub use editor::{Editor, EditorSettings};
pub use focus::{CaretRequest, FocusController};
pub use pagination::{DEFAULT_PAGE_HEIGHT, Geometry, PageBreakSet, PaginationError, Paginator};
pub use patch::Patch;
pub use snapshot::Snapshot;
pub use surface::RenderSurface;
