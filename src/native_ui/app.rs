//! Ticker window
//!
//! The window owns the `Panel` of cards and observes boards coming from the
//! refresh thread. It never fetches prices itself.

use std::sync::Arc;

use chrono::{DateTime, Local};
use crossbeam_channel::Receiver;
use eframe::egui::{self, Margin, RichText, Rounding, Stroke, Vec2};

use super::layout::{self, CARD_HEIGHT, CARD_MARGIN, FORM_WIDTH};
use super::theme::{FontSize, Theme};
use crate::config::TickerConfig;
use crate::core::PriceSource;
use crate::providers::CoinGeckoSource;
use crate::refresh::{PriceBoard, RefreshScheduler};
use crate::render::{Card, Panel};

/// Open the ticker window and block until it is closed
pub fn run(config: TickerConfig) -> anyhow::Result<()> {
    tracing::info!("Starting ticker window for {:?}", config.tokens);

    let source: Arc<dyn PriceSource> = Arc::new(CoinGeckoSource::new(
        config.api_base_url.clone(),
        config.request_timeout(),
    )?);

    let height = layout::window_height(config.tokens.len(), false);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Crypto Ticker")
            .with_inner_size([FORM_WIDTH, height])
            .with_min_inner_size([FORM_WIDTH, height])
            .with_resizable(false)
            .with_maximize_button(false),
        ..Default::default()
    };

    eframe::run_native(
        "Crypto Ticker",
        options,
        Box::new(move |cc| {
            let app = TickerApp::new(cc, config, source)?;
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Ticker window failed: {}", e))
}

struct TickerApp {
    panel: Panel,
    boards: Receiver<PriceBoard>,
    scheduler: RefreshScheduler,
    always_on_top: bool,
    last_update: Option<DateTime<Local>>,
    /// Card count and banner flag the window is currently sized for
    sized_for: (usize, bool),
    positioned: bool,
}

impl TickerApp {
    fn new(
        cc: &eframe::CreationContext<'_>,
        config: TickerConfig,
        source: Arc<dyn PriceSource>,
    ) -> anyhow::Result<Self> {
        let mut visuals = egui::Visuals::dark();
        visuals.panel_fill = Theme::BG_WINDOW;
        visuals.window_fill = Theme::BG_WINDOW;
        cc.egui_ctx.set_visuals(visuals);

        let panel = Panel::initial(&config.tokens);
        let sized_for = (panel.cards.len(), false);

        let ctx = cc.egui_ctx.clone();
        let (scheduler, boards) = RefreshScheduler::spawn(
            source,
            config.tokens.clone(),
            config.refresh_interval(),
            move || ctx.request_repaint(),
        )?;

        Ok(Self {
            panel,
            boards,
            scheduler,
            always_on_top: false,
            last_update: None,
            sized_for,
            positioned: false,
        })
    }

    fn drain_boards(&mut self) {
        while let Ok(board) = self.boards.try_recv() {
            self.panel.apply(&board);
            self.last_update = Some(board.updated_at.with_timezone(&Local));
        }
    }

    /// Resize the window when the number of cards or the banner changes
    fn fit_window(&mut self, ctx: &egui::Context) {
        let wanted = (self.panel.cards.len(), self.panel.banner.is_some());
        if wanted == self.sized_for {
            return;
        }
        let size = Vec2::new(FORM_WIDTH, layout::window_height(wanted.0, wanted.1));
        ctx.send_viewport_cmd(egui::ViewportCommand::MinInnerSize(size));
        ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(size));
        self.sized_for = wanted;
    }

    /// Move to the top-right corner once the monitor size is known
    fn position_window(&mut self, ctx: &egui::Context) {
        if self.positioned {
            return;
        }
        if let Some(monitor) = ctx.input(|i| i.viewport().monitor_size) {
            let pos = egui::pos2((monitor.x - FORM_WIDTH).max(0.0), 0.0);
            ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(pos));
            self.positioned = true;
        }
    }

    fn show_menu(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu")
            .exact_height(layout::MENU_HEIGHT)
            .frame(egui::Frame::none().fill(Theme::BG_MENU).inner_margin(Margin::symmetric(6.0, 4.0)))
            .show(ctx, |ui| {
                egui::menu::bar(ui, |ui| {
                    ui.menu_button(RichText::new("Settings").color(Theme::TEXT_MENU), |ui| {
                        if ui.checkbox(&mut self.always_on_top, "Always on Top").changed() {
                            let level = if self.always_on_top {
                                egui::WindowLevel::AlwaysOnTop
                            } else {
                                egui::WindowLevel::Normal
                            };
                            ctx.send_viewport_cmd(egui::ViewportCommand::WindowLevel(level));
                        }
                        if ui.button("Refresh now").clicked() {
                            self.scheduler.refresh_now();
                            ui.close_menu();
                        }
                    });
                });
            });
    }

    fn show_cards(&self, ctx: &egui::Context) {
        let padding = Margin {
            left: layout::PADDING_LEFT,
            right: layout::PADDING_RIGHT,
            top: layout::PADDING_TOP,
            bottom: layout::PADDING_BOTTOM,
        };

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Theme::BG_PANEL).inner_margin(padding))
            .show(ctx, |ui| {
                if let Some(banner) = &self.panel.banner {
                    ui.label(RichText::new(banner).color(Theme::RED));
                    ui.add_space(CARD_MARGIN);
                }

                for card in &self.panel.cards {
                    ui.add_space(CARD_MARGIN);
                    show_card(ui, card);
                    ui.add_space(CARD_MARGIN);
                }

                if let Some(updated) = self.last_update {
                    ui.add_space(CARD_MARGIN);
                    ui.label(
                        RichText::new(format!("Updated {}", updated.format("%H:%M:%S")))
                            .size(FontSize::SMALL)
                            .color(Theme::TEXT_MUTED),
                    );
                }
            });
    }
}

fn show_card(ui: &mut egui::Ui, card: &Card) {
    egui::Frame::none()
        .fill(Theme::BG_CARD)
        .stroke(Stroke::new(1.0, Theme::BORDER))
        .rounding(Rounding::ZERO)
        .inner_margin(Margin::same(10.0))
        .show(ui, |ui| {
            // Frame margins are added on top of the content size
            ui.set_min_size(Vec2::new(
                layout::card_width() - 20.0,
                CARD_HEIGHT - 20.0,
            ));
            ui.vertical(|ui| {
                ui.label(
                    RichText::new(&card.title)
                        .size(FontSize::TITLE)
                        .strong()
                        .color(Theme::TEXT_PRIMARY),
                );
                ui.add_space(8.0);
                ui.label(
                    RichText::new(&card.price_text)
                        .size(FontSize::BODY)
                        .color(Theme::TEXT_PRIMARY),
                );
                ui.label(
                    RichText::new(&card.change_text)
                        .size(FontSize::BODY)
                        .color(Theme::tone_color(card.tone)),
                );
            });
        });
}

impl eframe::App for TickerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_boards();
        self.position_window(ctx);
        self.fit_window(ctx);
        self.show_menu(ctx);
        self.show_cards(ctx);
    }
}
