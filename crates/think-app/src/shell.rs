//! Full-page HTML and route dispatch.

use tracing::info;

use think_core::RecordStore;
use think_render::html_escape;

use crate::layout::Masonry;
use crate::pages::{self, NoteView};
use crate::router::Route;
use crate::view::ViewState;

/// Wrap a page body in the document shell with the navigation header.
pub fn render_page(route: &Route, body: &str) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>",
            "<html><head><meta charset=\"utf-8\"><title>think {}</title></head>",
            "<body><header><nav>",
            "<a href=\"/r\">Records</a>",
            "<a href=\"/n/new\">New Note</a>",
            "</nav></header>",
            "<main>{}</main>",
            "<footer></footer>",
            "</body></html>"
        ),
        html_escape(&route.path()),
        body
    )
}

/// Render the page at `path` for a viewport `width` pixels wide.
pub async fn open(store: &dyn RecordStore, path: &str, width: u32) -> String {
    let route = Route::parse(path);
    info!(route = %route, width, "Opening page");

    let body = match &route {
        Route::Root => String::new(),
        Route::Records => pages::records_page(store, Masonry::default(), width)
            .await
            .to_html(|view| view.to_html()),
        Route::NewNote => match pages::new_note_page() {
            Ok(new) => NoteView::Editor {
                id: new.id,
                session: new.session,
            }
            .to_html(width),
            Err(e) => format!("<pre>{}</pre>", html_escape(&e.to_string())),
        },
        Route::Note(id) => {
            let view = pages::note_page(store, id).await;
            let embeds = match &view {
                ViewState::Ready(NoteView::Editor { session, .. }) => {
                    pages::embedded_records(store, session).await
                }
                _ => Vec::new(),
            };
            view.to_html(|note| pages::expand_embeds(&note.to_html(width), &embeds))
        }
        Route::Unknown(path) => format!("<pre>Unknown page {}</pre>", html_escape(path)),
    };

    render_page(&route, &body)
}
