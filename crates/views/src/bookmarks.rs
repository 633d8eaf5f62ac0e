//! Bookmarked posts grid.

use serde::Serialize;
use snapfeed_core::BookmarkedPost;

use crate::html::html_escape;

/// Number of tiles per grid row.
pub const GRID_COLUMNS: usize = 3;

/// One square tile of the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tile {
    /// Post the tile links to.
    pub post_id: String,
    /// Square thumbnail source.
    pub image_url: String,
}

/// What the bookmarks screen shows for a given query result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "tiles", rename_all = "camelCase")]
pub enum FeedState {
    /// The query has not produced a result yet.
    Loading,
    /// The user has no bookmarks.
    Empty,
    /// Bookmarked posts, newest first. Bookmarks of deleted posts are left out.
    Grid(Vec<Tile>),
}

impl FeedState {
    /// Build the screen state from a bookmarks query result.
    ///
    /// `None` means the result is still pending. A non-empty result whose
    /// posts were all deleted renders an empty grid, not the empty state.
    #[must_use]
    pub fn from_query(result: Option<&[Option<BookmarkedPost>]>) -> Self {
        match result {
            None => Self::Loading,
            Some([]) => Self::Empty,
            Some(entries) => Self::Grid(
                entries
                    .iter()
                    .flatten()
                    .map(|post| Tile {
                        post_id: post.id.clone(),
                        image_url: post.image_url.clone(),
                    })
                    .collect(),
            ),
        }
    }

    /// Tiles split into rows of [`GRID_COLUMNS`]. Empty unless in the grid state.
    #[must_use]
    pub fn rows(&self) -> Vec<&[Tile]> {
        match self {
            Self::Grid(tiles) => tiles.chunks(GRID_COLUMNS).collect(),
            Self::Loading | Self::Empty => Vec::new(),
        }
    }

    /// Render the screen as an HTML fragment.
    #[must_use]
    pub fn to_html(&self) -> String {
        match self {
            Self::Loading => "<div class=\"loader\"></div>".to_string(),
            Self::Empty => {
                "<div class=\"no-bookmarks\"><p>No bookmarked posts yet</p></div>".to_string()
            }
            Self::Grid(tiles) => {
                let tiles_html: String = tiles
                    .iter()
                    .map(|tile| {
                        format!(
                            "<div class=\"tile\" data-post-id=\"{}\" style=\"width: 33.33%; padding: 1px;\"><img src=\"{}\" style=\"width: 100%; aspect-ratio: 1;\" loading=\"lazy\" /></div>",
                            html_escape(&tile.post_id),
                            html_escape(&tile.image_url)
                        )
                    })
                    .collect();

                format!(
                    "<div class=\"container\"><div class=\"header\"><h1 class=\"header-title\">Bookmarks</h1></div><div class=\"grid\" style=\"padding: 8px; display: flex; flex-wrap: wrap;\">{tiles_html}</div></div>"
                )
            }
        }
    }
}
