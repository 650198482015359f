use std::time::Duration;

use arboard::Clipboard;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::{deployment::Deployment, domain::ConnectorDescriptor};
use wallet_core::MintFlowState;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiEvent};
use crate::controller::orchestration::submit_action;
use crate::ui::theme;
use crate::ui::view_model::{ConnectControls, ExplorerLink, MintPanelView};

const SITE_URL: &str = "https://tokenizados.net/es";
const CARD_WIDTH: f32 = 460.0;

pub struct MintGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    status: String,
    status_banner: Option<UiError>,
    connectors: Vec<ConnectorDescriptor>,
    deployment: Option<Deployment>,
    flow: MintFlowState,
    acknowledged_revision: Option<u64>,
    theme_applied: bool,
}

impl MintGuiApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            status: "Iniciando...".to_string(),
            status_banner: None,
            connectors: Vec::new(),
            deployment: None,
            flow: MintFlowState::default(),
            acknowledged_revision: None,
            theme_applied: false,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Ready {
                    connectors,
                    deployment,
                } => {
                    self.status = format!(
                        "Listo en {} ({} wallet(s) configurada(s))",
                        deployment.network_name,
                        connectors.len()
                    );
                    self.connectors = connectors;
                    self.deployment = Some(deployment);
                }
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::FlowChanged(state) => {
                    // Snapshots from concurrent tasks may arrive out of order.
                    if state.revision() >= self.flow.revision() {
                        self.flow = state;
                    }
                }
                UiEvent::Error(err) => {
                    tracing::warn!(context = ?err.context(), "{}", err.message());
                    self.status_banner = Some(err);
                }
            }
        }
    }

    fn send(&mut self, cmd: BackendCommand) {
        if let Err(rejection) = submit_action(&self.cmd_tx, cmd) {
            self.status = rejection.status_text();
        }
    }

    fn show_header(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("site_header")
            .resizable(false)
            .frame(
                egui::Frame::NONE
                    .fill(theme::HEADER_BACKGROUND)
                    .inner_margin(egui::Margin::symmetric(16, 10)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new("Tokenizados")
                            .size(22.0)
                            .strong()
                            .color(theme::ACCENT),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if let Some(deployment) = &self.deployment {
                            ui.label(
                                egui::RichText::new(&deployment.network_name)
                                    .color(theme::TEXT_MUTED),
                            );
                        }
                    });
                });
            });
    }

    fn show_footer(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("site_footer")
            .resizable(false)
            .frame(
                egui::Frame::NONE
                    .fill(theme::HEADER_BACKGROUND)
                    .inner_margin(egui::Margin::symmetric(16, 8)),
            )
            .show(ctx, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(
                        egui::RichText::new("© 2025 Tokenizados. Todos los derechos reservados.")
                            .small()
                            .color(theme::TEXT_MUTED),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.hyperlink_to("🏠 Inicio", SITE_URL);
                        ui.hyperlink_to("📖 Blog Oficial", SITE_URL);
                    });
                });
                if !self.status.is_empty() {
                    ui.label(egui::RichText::new(&self.status).small().color(theme::TEXT_MUTED));
                }
            });
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        let Some(banner) = self.status_banner.clone() else {
            return;
        };

        egui::Frame::NONE
            .fill(theme::ERROR_FILL)
            .stroke(egui::Stroke::new(1.0, theme::ERROR_STROKE))
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(egui::RichText::new(banner.banner_text()).color(egui::Color32::WHITE));
                    if !banner.is_fatal_for_session() {
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Cerrar").clicked() {
                                self.status_banner = None;
                            }
                        });
                    }
                });
            });
        ui.add_space(8.0);
    }

    fn show_hero(ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(12.0);
            ui.label(
                egui::RichText::new("Bienvenido a Tokenizados")
                    .size(30.0)
                    .strong(),
            );
            ui.label(
                egui::RichText::new("Tu portal de información sobre tokenización y blockchain")
                    .size(16.0)
                    .color(theme::TEXT_MUTED),
            );
            ui.add_space(16.0);
        });
    }

    fn show_mint_card(&mut self, ui: &mut egui::Ui, view: &MintPanelView) {
        egui::Frame::NONE
            .fill(theme::CARD_BACKGROUND)
            .stroke(egui::Stroke::new(1.0, theme::CARD_STROKE))
            .corner_radius(12.0)
            .inner_margin(egui::Margin::symmetric(20, 18))
            .show(ui, |ui| {
                ui.set_width(CARD_WIDTH);
                ui.vertical_centered(|ui| {
                    ui.label(egui::RichText::new("Mint Bonus NFT").size(22.0).strong());
                    ui.label(
                        egui::RichText::new("Conecta tu wallet y mintea tu NFT")
                            .color(theme::TEXT_MUTED),
                    );
                    ui.add_space(12.0);

                    if let Some(controls) = &view.connect {
                        self.show_connect_controls(ui, controls);
                        if let Some(err) = &view.inline_error {
                            ui.add_space(6.0);
                            ui.colored_label(theme::ERROR, err);
                        }
                        return;
                    }

                    self.show_connected(ui, view);
                });
            });
    }

    fn show_connect_controls(&mut self, ui: &mut egui::Ui, controls: &ConnectControls) {
        let button_size = egui::vec2(CARD_WIDTH * 0.7, 40.0);
        match controls {
            ConnectControls::Single { label, enabled } => {
                let button = egui::Button::new(egui::RichText::new(label).strong())
                    .min_size(button_size);
                if ui.add_enabled(*enabled, button).clicked() {
                    self.send(BackendCommand::Connect { connector: None });
                }
            }
            ConnectControls::PerConnector { buttons, enabled } => {
                for (id, label) in buttons {
                    let button = egui::Button::new(egui::RichText::new(label).strong())
                        .min_size(button_size);
                    if ui.add_enabled(*enabled, button).clicked() {
                        self.send(BackendCommand::Connect {
                            connector: Some(id.clone()),
                        });
                    }
                }
            }
        }
    }

    fn show_connected(&mut self, ui: &mut egui::Ui, view: &MintPanelView) {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Wallet conectada:").color(theme::TEXT_MUTED));
            if let Some(account) = &view.account_label {
                ui.label(egui::RichText::new(account).monospace().strong());
            }
        });
        ui.add_space(10.0);

        egui::Frame::NONE
            .fill(theme::PAGE_BACKGROUND)
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(12, 10))
            .show(ui, |ui| {
                ui.label(egui::RichText::new("💰 Sistema de Recompensas").strong());
                ui.label(
                    egui::RichText::new(
                        "Si el NFT ID es múltiplo de 10 (≤50), recibirás tokens automáticamente:",
                    )
                    .color(theme::TEXT_MUTED),
                );
                for line in &view.reward_lines {
                    ui.label(line);
                }
            });
        ui.add_space(12.0);

        let mint = egui::Button::new(egui::RichText::new(view.mint_label).size(18.0).strong())
            .min_size(egui::vec2(CARD_WIDTH * 0.7, 44.0));
        if ui.add_enabled(view.mint_enabled, mint).clicked() {
            self.send(BackendCommand::Mint);
        }

        if let Some(link) = &view.explorer_link {
            ui.add_space(10.0);
            self.show_success(ui, link);
        }

        ui.add_space(10.0);
        if ui.small_button("Desconectar").clicked() {
            self.send(BackendCommand::Disconnect);
        }
    }

    fn show_success(&mut self, ui: &mut egui::Ui, link: &ExplorerLink) {
        egui::Frame::NONE
            .fill(theme::SUCCESS_FILL)
            .stroke(egui::Stroke::new(1.0, theme::SUCCESS))
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(12, 10))
            .show(ui, |ui| {
                ui.label(
                    egui::RichText::new("✅ NFT Minteado!")
                        .strong()
                        .color(theme::SUCCESS),
                );
                ui.label("Transacción exitosa. Revisa si recibiste recompensas.");
                ui.horizontal(|ui| {
                    ui.hyperlink_to(&link.label, &link.url);
                    if ui.small_button("Copiar hash").clicked() {
                        self.copy_tx_hash(&link.tx_hash);
                    }
                });
            });
    }

    fn copy_tx_hash(&mut self, tx_hash: &str) {
        match Clipboard::new().and_then(|mut clipboard| clipboard.set_text(tx_hash.to_string())) {
            Ok(()) => self.status = "Hash de la transacción copiado".to_string(),
            Err(err) => {
                tracing::warn!("clipboard unavailable: {err}");
                self.status = format!("No se pudo copiar el hash: {err}");
            }
        }
    }

    fn show_blocking_notice(&mut self, ctx: &egui::Context, view: &MintPanelView) {
        let Some(notice) = &view.blocking_notice else {
            return;
        };

        egui::Window::new("Aviso")
            .id(egui::Id::new("blocking_notice_window"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .frame(
                egui::Frame::popup(&ctx.style())
                    .fill(theme::CARD_BACKGROUND)
                    .stroke(egui::Stroke::new(1.0, theme::ERROR_STROKE))
                    .corner_radius(egui::CornerRadius::same(8)),
            )
            .show(ctx, |ui| {
                ui.set_max_width(360.0);
                ui.label(&notice.message);
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("Aceptar").clicked() {
                        self.acknowledged_revision = Some(notice.revision);
                    }
                });
            });
    }
}

impl eframe::App for MintGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        if !self.theme_applied {
            theme::apply(ctx);
            self.theme_applied = true;
        }

        let view = self.deployment.as_ref().map(|deployment| {
            MintPanelView::build(
                &self.flow,
                &self.connectors,
                deployment,
                self.acknowledged_revision,
            )
        });

        self.show_header(ctx);
        self.show_footer(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.show_status_banner(ui);
                Self::show_hero(ui);
                ui.vertical_centered(|ui| match &view {
                    Some(view) => self.show_mint_card(ui, view),
                    None => {
                        ui.spinner();
                        ui.label(egui::RichText::new(&self.status).color(theme::TEXT_MUTED));
                    }
                });
            });
        });

        if let Some(view) = &view {
            self.show_blocking_notice(ctx, view);
        }

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
