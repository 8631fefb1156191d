//! Component trait implemented by every page collaborator.

use crate::markup::Markup;

/// Something that renders into a page.
pub trait Component {
    /// Write this component's markup.
    fn render(&self, out: &mut Markup);

    /// Render on its own and return the HTML fragment.
    fn to_html(&self) -> String {
        let mut out = Markup::new();
        self.render(&mut out);
        out.into_parts().0
    }
}
