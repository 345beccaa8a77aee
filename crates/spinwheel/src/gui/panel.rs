use gtk::prelude::*;
use gtk4 as gtk;
use wheelkit::OptionList;

pub const EMPTY_TEXT: &str = "Add some options to get started!";

pub fn placeholder() -> gtk::Label {
    let label = gtk::Label::new(Some(EMPTY_TEXT));
    label.add_css_class("dim-label");
    label.set_margin_top(16);
    label.set_margin_bottom(16);
    label
}

/// Refills `list` with one row per option. Remove buttons report the row's
/// current index.
pub fn rebuild<F>(list: &gtk::ListBox, items: &OptionList, editable: bool, on_remove: F)
where
    F: Fn(usize) + Clone + 'static,
{
    // row_at_index skips the placeholder, which is also a child
    while let Some(row) = list.row_at_index(0) {
        list.remove(&row);
    }

    for (index, item) in items.iter().enumerate() {
        let row = gtk::Box::new(gtk::Orientation::Horizontal, 8);
        row.set_margin_start(12);
        row.set_margin_end(6);
        row.set_margin_top(6);
        row.set_margin_bottom(6);

        let label = gtk::Label::new(Some(item));
        label.set_hexpand(true);
        label.set_xalign(0.0);
        label.set_ellipsize(gtk::pango::EllipsizeMode::End);
        row.append(&label);

        let remove = gtk::Button::from_icon_name("user-trash-symbolic");
        remove.add_css_class("flat");
        remove.set_tooltip_text(Some(&format!("Remove {}", item)));
        remove.set_sensitive(editable);
        let on_remove = on_remove.clone();
        remove.connect_clicked(move |_| on_remove(index));
        row.append(&remove);

        list.append(&row);
    }
}
