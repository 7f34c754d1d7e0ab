//! Native catalog viewer using egui
//!
//! Left panel: category tree, search box and field filters.
//! Central panel: card grid with "Load more".
//! Clicking a card opens the detail modal with its image gallery.

use eframe::egui;
use tracing::info;

use crate::catalog::SpecimenSize;
use crate::config::Config;
use crate::filter::{FilterInputs, Selection, ALL_CATEGORIES};
use crate::modal::{ModalEvent, ModalKey};
use crate::state::MuseumState;

const CARD_WIDTH: f32 = 180.0;
const THUMB_SIZE: f32 = 64.0;

/// Run the native GUI viewer
pub fn run_viewer(config: &Config, state: MuseumState) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_title(&config.window.title),
        ..Default::default()
    };

    eframe::run_native(
        &config.window.title,
        options,
        Box::new(|cc| Ok(Box::new(MuseumApp::new(cc, state)))),
    )
    .map_err(|e| anyhow::anyhow!("GUI error: {}", e))
}

struct MuseumApp {
    state: MuseumState,
    // Edit buffers for the text controls
    query: String,
    inputs: FilterInputs,
}

impl MuseumApp {
    fn new(cc: &eframe::CreationContext<'_>, state: MuseumState) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        egui_extras::install_image_loaders(&cc.egui_ctx);
        info!("Viewer ready with {} specimens", state.specimens().len());
        Self::from_state(state)
    }

    fn from_state(state: MuseumState) -> Self {
        Self {
            query: state.query().to_string(),
            inputs: state.inputs().clone(),
            state,
        }
    }

    /// Reset is offered while anything is typed or selected, parsed or not
    fn can_reset(&self) -> bool {
        !self.state.filter().is_unconstrained()
            || !self.query.is_empty()
            || self.inputs != FilterInputs::default()
    }

    fn category_tree(&mut self, ui: &mut egui::Ui) {
        let nav = self.state.nav().clone();
        let active = nav.active(self.state.selection());
        let mut picked: Option<Selection> = None;

        for (index, entry) in nav.roots() {
            let children = nav.children(index);
            if children.is_empty() {
                if ui.selectable_label(active == Some(index), &entry.label).clicked() {
                    picked = Some(entry.selection.clone());
                }
                continue;
            }

            // An active subcategory keeps its parent expanded so it stays visible
            let child_active = active.is_some_and(|a| a > index && a <= index + children.len());
            let id = ui.make_persistent_id(("category", &entry.label));
            let mut header =
                egui::collapsing_header::CollapsingState::load_with_default_open(ui.ctx(), id, false);
            if child_active {
                header.set_open(true);
            }
            header
                .show_header(ui, |ui| {
                    if ui.selectable_label(active == Some(index), &entry.label).clicked() {
                        picked = Some(entry.selection.clone());
                    }
                })
                .body(|ui| {
                    for (offset, child) in children.iter().enumerate() {
                        let selected = active == Some(index + 1 + offset);
                        if ui.selectable_label(selected, &child.label).clicked() {
                            picked = Some(child.selection.clone());
                        }
                    }
                });
        }

        if let Some(selection) = picked {
            self.state.select(selection);
        }
    }

    fn filter_controls(&mut self, ui: &mut egui::Ui) {
        let search = ui.add(egui::TextEdit::singleline(&mut self.query).hint_text("Search by name"));
        if search.changed() {
            self.state.set_query(self.query.clone());
        }

        ui.add_space(8.0);
        if self.state.filter().fields.is_empty() {
            ui.label("Filters");
        } else {
            ui.strong("Filters (active)");
        }

        let inputs = &mut self.inputs;
        ui.add(egui::TextEdit::singleline(&mut inputs.locality).hint_text("Locality"));

        egui::ComboBox::from_id_salt("size")
            .selected_text(inputs.size.map(|s| s.label()).unwrap_or("Any size"))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut inputs.size, None, "Any size");
                for size in SpecimenSize::ALL {
                    ui.selectable_value(&mut inputs.size, Some(size), size.label());
                }
            });

        ui.horizontal(|ui| {
            ui.label("Weight");
            ui.add(egui::TextEdit::singleline(&mut inputs.weight_min).hint_text("min").desired_width(60.0));
            ui.add(egui::TextEdit::singleline(&mut inputs.weight_max).hint_text("max").desired_width(60.0));
        });
        ui.horizontal(|ui| {
            ui.label("Price");
            ui.add(egui::TextEdit::singleline(&mut inputs.price_min).hint_text("min").desired_width(60.0));
            ui.add(egui::TextEdit::singleline(&mut inputs.price_max).hint_text("max").desired_width(60.0));
        });
        ui.add(egui::TextEdit::singleline(&mut inputs.system).hint_text("Crystal system"));

        if *inputs != *self.state.inputs() {
            self.state.set_inputs(inputs.clone());
        }

        if ui.add_enabled(self.can_reset(), egui::Button::new("Reset filters")).clicked() {
            self.state.reset_filters();
            self.query.clear();
            self.inputs = FilterInputs::default();
        }
    }

    fn card_grid(&mut self, ui: &mut egui::Ui) {
        let mut opened: Option<usize> = None;

        egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                for (position, card) in self.state.grid().iter().enumerate() {
                    let response = egui::Frame::group(ui.style())
                        .show(ui, |ui| {
                            ui.set_width(CARD_WIDTH);
                            ui.vertical(|ui| {
                                ui.add(
                                    egui::Image::new(card.image.as_str())
                                        .fit_to_exact_size(egui::vec2(CARD_WIDTH, CARD_WIDTH)),
                                );
                                ui.strong(&card.name);
                                ui.label(&card.locality);
                            });
                        })
                        .response
                        .interact(egui::Sense::click())
                        .on_hover_cursor(egui::CursorIcon::PointingHand);

                    if response.clicked() {
                        opened = Some(position);
                    }
                }
            });

            if self.state.has_more() {
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("Load more").clicked() {
                        self.state.load_more();
                    }
                });
            }
        });

        if let Some(position) = opened {
            self.state.open_card(position);
        }
    }

    fn detail_modal(&mut self, ctx: &egui::Context) {
        let Some(card) = self.state.modal().card().cloned() else {
            return;
        };
        let gallery = self.state.modal().gallery().cloned().unwrap_or_default();
        let main_image = self.state.modal().main_image().map(str::to_string);
        let mut events: Vec<ModalEvent> = Vec::new();

        // Dimmed backdrop; clicking it closes the modal
        let screen = ctx.screen_rect();
        let backdrop = egui::Area::new(egui::Id::new("modal_backdrop"))
            .order(egui::Order::Middle)
            .fixed_pos(screen.min)
            .show(ctx, |ui| {
                ui.painter().rect_filled(screen, 0.0, egui::Color32::from_black_alpha(180));
                ui.allocate_rect(screen, egui::Sense::click())
            });
        if backdrop.inner.clicked() {
            events.push(ModalEvent::BackdropClicked);
        }

        let mut open = true;
        egui::Window::new(&card.name)
            .id(egui::Id::new("specimen_modal"))
            .order(egui::Order::Foreground)
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                if let Some(main) = &main_image {
                    ui.vertical_centered(|ui| {
                        ui.add(egui::Image::new(main.as_str()).max_height(420.0).max_width(640.0));
                    });
                }

                if !gallery.is_empty() {
                    egui::ScrollArea::horizontal().id_salt("gallery").show(ui, |ui| {
                        ui.horizontal(|ui| {
                            for (index, src) in gallery.images().iter().enumerate() {
                                let thumb = egui::Image::new(src.as_str())
                                    .fit_to_exact_size(egui::vec2(THUMB_SIZE, THUMB_SIZE));
                                let clicked = ui
                                    .add(egui::ImageButton::new(thumb).selected(index == gallery.index()))
                                    .clicked();
                                if clicked {
                                    events.push(ModalEvent::ThumbnailClicked(index));
                                }
                            }
                        });
                    });
                }

                ui.separator();
                egui::Grid::new("specimen_fields").num_columns(2).striped(true).show(ui, |ui| {
                    for (label, value) in [
                        ("Locality", card.locality.as_str()),
                        ("Dimensions", card.dimensions.as_str()),
                        ("Size", card.size.as_str()),
                        ("Weight", card.weight.as_str()),
                        ("Price", card.price.as_str()),
                        ("Crystal system", card.system.as_str()),
                        ("Self-collected", card.self_collected),
                    ] {
                        ui.strong(label);
                        ui.label(value);
                        ui.end_row();
                    }
                });

                if !card.description.is_empty() {
                    ui.separator();
                    ui.label(&card.description);
                }
            });

        if !open {
            events.push(ModalEvent::CloseClicked);
        }
        for event in events {
            self.state.handle_modal(event);
        }
    }
}

fn pressed_modal_keys(ctx: &egui::Context) -> Vec<ModalKey> {
    ctx.input(|i| {
        [
            (egui::Key::Escape, ModalKey::Escape),
            (egui::Key::ArrowLeft, ModalKey::ArrowLeft),
            (egui::Key::ArrowRight, ModalKey::ArrowRight),
        ]
        .into_iter()
        .filter(|(key, _)| i.key_pressed(*key))
        .map(|(_, modal_key)| modal_key)
        .collect()
    })
}

impl eframe::App for MuseumApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Keys are ignored by the state while the modal is closed
        for key in pressed_modal_keys(ctx) {
            self.state.handle_modal(ModalEvent::Key(key));
        }

        egui::SidePanel::left("nav_panel").min_width(240.0).show(ctx, |ui| {
            ui.heading("Mineral Museum");
            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| {
                self.category_tree(ui);
                ui.separator();
                self.filter_controls(ui);
            });
        });

        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let selection = self.state.selection();
                let scope = match (selection.category(), selection.subcategory()) {
                    (Some(category), Some(sub)) => format!("{} / {}", category, sub),
                    (Some(category), None) => category.to_string(),
                    _ => ALL_CATEGORIES.to_string(),
                };
                ui.strong(scope);
                ui.separator();
                ui.label(format!(
                    "{} of {} specimens | showing {}",
                    self.state.filtered_count(),
                    self.state.specimens().len(),
                    self.state.grid().len(),
                ));
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.filtered_count() == 0 {
                ui.centered_and_justified(|ui| ui.label("No specimens match"));
            } else {
                self.card_grid(ui);
            }
        });

        self.detail_modal(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::museum;

    fn collect_text(shape: &egui::Shape, out: &mut Vec<String>) {
        match shape {
            egui::Shape::Text(text) => out.push(text.galley.text().to_string()),
            egui::Shape::Vec(shapes) => shapes.iter().for_each(|s| collect_text(s, out)),
            _ => {}
        }
    }

    /// Render the category tree headlessly and return every drawn label
    fn drawn_tree_labels(app: &mut MuseumApp, frames: usize) -> Vec<String> {
        let ctx = egui::Context::default();
        let mut labels = Vec::new();
        for _ in 0..frames {
            let output = ctx.run(egui::RawInput::default(), |ctx| {
                egui::CentralPanel::default().show(ctx, |ui| app.category_tree(ui));
            });
            labels.clear();
            for clipped in &output.shapes {
                collect_text(&clipped.shape, &mut labels);
            }
        }
        labels
    }

    #[test]
    fn test_active_subcategory_is_drawn() {
        let mut state = MuseumState::new(museum(), 24);
        assert!(state.select(Selection::Subcategory {
            category: "Quartz".into(),
            subcategory: "Amethyst".into(),
        }));
        let mut app = MuseumApp::from_state(state);

        for frames in [1, 2] {
            let labels = drawn_tree_labels(&mut app, frames);
            assert!(labels.iter().any(|l| l == "Amethyst"), "drawn: {:?}", labels);
        }
    }

    #[test]
    fn test_category_selection_leaves_tree_collapsed() {
        let mut state = MuseumState::new(museum(), 24);
        state.select(Selection::Category("Quartz".into()));
        let mut app = MuseumApp::from_state(state);

        let labels = drawn_tree_labels(&mut app, 2);
        assert!(labels.iter().any(|l| l == "Quartz"));
        assert!(!labels.iter().any(|l| l == "Amethyst"));
    }

    #[test]
    fn test_reset_enabled_for_unparsable_input() {
        let mut app = MuseumApp::from_state(MuseumState::new(museum(), 24));
        assert!(!app.can_reset());

        app.inputs.weight_min = "abc".into();
        app.state.set_inputs(app.inputs.clone());
        assert!(app.state.filter().is_unconstrained());
        assert!(app.can_reset());

        app.inputs = FilterInputs::default();
        app.query = "zzz".into();
        assert!(app.can_reset());
    }
}
