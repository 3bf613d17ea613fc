use eframe::egui;
use tokio::sync::mpsc;

use tictactoe_core::game::{GameMode, GameStatus, Mark};
use tictactoe_core::session::GameSnapshot;

use crate::config::ClientConfig;
use crate::state::{ClientCommand, SharedState};

pub struct GameApp {
    shared_state: SharedState,
    command_tx: mpsc::UnboundedSender<ClientCommand>,
    selected_mode: GameMode,
}

impl GameApp {
    const CELL_SIZE: f32 = 110.0;
    const LINE_WIDTH: f32 = 2.0;

    pub fn new(
        config: &ClientConfig,
        shared_state: SharedState,
        command_tx: mpsc::UnboundedSender<ClientCommand>,
    ) -> Self {
        Self {
            shared_state,
            command_tx,
            selected_mode: config.mode,
        }
    }

    fn render_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let previous = self.selected_mode;
            egui::ComboBox::from_label("Mode")
                .selected_text(match self.selected_mode {
                    GameMode::PlayerVsPlayer => "Player vs Player",
                    GameMode::PlayerVsAi => "Player vs AI",
                })
                .show_ui(ui, |ui| {
                    ui.selectable_value(
                        &mut self.selected_mode,
                        GameMode::PlayerVsPlayer,
                        "Player vs Player",
                    );
                    ui.selectable_value(&mut self.selected_mode, GameMode::PlayerVsAi, "Player vs AI");
                });
            if self.selected_mode != previous {
                let _ = self
                    .command_tx
                    .send(ClientCommand::SetMode(self.selected_mode));
            }

            if ui.button("New Game").clicked() {
                let _ = self.command_tx.send(ClientCommand::NewGame);
            }
        });
    }

    fn render_board(&self, ui: &mut egui::Ui, snapshot: &GameSnapshot) {
        let board_size = Self::CELL_SIZE * 3.0;
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(board_size, board_size), egui::Sense::click());

        let painter = ui.painter();
        painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(240, 240, 240));

        if let Some(index) = snapshot.last_move {
            painter.rect_filled(
                Self::cell_rect(rect, index),
                0.0,
                egui::Color32::from_rgba_unmultiplied(255, 235, 120, 60),
            );
        }

        for i in 0..=3 {
            let x = rect.left() + i as f32 * Self::CELL_SIZE;
            painter.line_segment(
                [egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())],
                egui::Stroke::new(Self::LINE_WIDTH, egui::Color32::BLACK),
            );
            let y = rect.top() + i as f32 * Self::CELL_SIZE;
            painter.line_segment(
                [egui::pos2(rect.left(), y), egui::pos2(rect.right(), y)],
                egui::Stroke::new(Self::LINE_WIDTH, egui::Color32::BLACK),
            );
        }

        for (index, mark) in snapshot.cells.iter().enumerate() {
            let cell_rect = Self::cell_rect(rect, index);
            match mark {
                Mark::X => Self::draw_x(painter, cell_rect),
                Mark::O => Self::draw_o(painter, cell_rect),
                Mark::Empty => {}
            }
        }

        // Clicks are dead on occupied cells, after game over, and while
        // the AI is to move.
        let clicks_enabled = snapshot.status == GameStatus::InProgress
            && snapshot.ai_mark != Some(snapshot.current_mark);
        if !clicks_enabled {
            return;
        }

        let hovered_empty_cell = response.hover_pos().and_then(|pos| {
            let index = Self::cell_index_at(rect, pos)?;
            (snapshot.cells[index] == Mark::Empty).then_some(index)
        });

        if let Some(index) = hovered_empty_cell {
            painter.rect_filled(
                Self::cell_rect(rect, index),
                0.0,
                egui::Color32::from_rgba_unmultiplied(100, 150, 255, 50),
            );
        }

        if response.clicked()
            && let Some(pos) = response.interact_pointer_pos()
            && let Some(index) = Self::cell_index_at(rect, pos)
            && snapshot.cells[index] == Mark::Empty
        {
            let _ = self.command_tx.send(ClientCommand::PlaceMark { index });
        }
    }

    fn cell_index_at(board_rect: egui::Rect, pos: egui::Pos2) -> Option<usize> {
        if !board_rect.contains(pos) {
            return None;
        }
        let col = ((pos.x - board_rect.left()) / Self::CELL_SIZE) as usize;
        let row = ((pos.y - board_rect.top()) / Self::CELL_SIZE) as usize;
        if col < 3 && row < 3 {
            Some(row * 3 + col)
        } else {
            None
        }
    }

    fn cell_rect(board_rect: egui::Rect, index: usize) -> egui::Rect {
        let col = index % 3;
        let row = index / 3;
        egui::Rect::from_min_size(
            egui::pos2(
                board_rect.left() + col as f32 * Self::CELL_SIZE,
                board_rect.top() + row as f32 * Self::CELL_SIZE,
            ),
            egui::vec2(Self::CELL_SIZE, Self::CELL_SIZE),
        )
    }

    fn draw_x(painter: &egui::Painter, rect: egui::Rect) {
        let padding = rect.width() * 0.2;
        let stroke = egui::Stroke::new(4.0, egui::Color32::from_rgb(220, 50, 50));

        painter.line_segment(
            [
                egui::pos2(rect.left() + padding, rect.top() + padding),
                egui::pos2(rect.right() - padding, rect.bottom() - padding),
            ],
            stroke,
        );
        painter.line_segment(
            [
                egui::pos2(rect.right() - padding, rect.top() + padding),
                egui::pos2(rect.left() + padding, rect.bottom() - padding),
            ],
            stroke,
        );
    }

    fn draw_o(painter: &egui::Painter, rect: egui::Rect) {
        let padding = rect.width() * 0.2;
        let radius = (rect.width() / 2.0) - padding;
        painter.circle_stroke(
            rect.center(),
            radius,
            egui::Stroke::new(4.0, egui::Color32::from_rgb(50, 90, 220)),
        );
    }

    fn status_message(snapshot: &GameSnapshot) -> String {
        if let Some(winner) = snapshot.status.winner() {
            return format!("{} wins!", winner);
        }
        match snapshot.status {
            GameStatus::Draw => "It's a draw!".to_string(),
            _ => {
                if snapshot.ai_mark == Some(snapshot.current_mark) {
                    format!("{} is thinking...", snapshot.current_mark)
                } else {
                    format!("{} to move", snapshot.current_mark)
                }
            }
        }
    }
}

impl eframe::App for GameApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Tic-Tac-Toe");
            self.render_controls(ui);

            if let Some(error) = self.shared_state.get_error() {
                ui.colored_label(egui::Color32::RED, error);
            }

            ui.add_space(10.0);

            match self.shared_state.get_snapshot() {
                Some(snapshot) => {
                    self.render_board(ui, &snapshot);
                    ui.add_space(10.0);
                    ui.heading(Self::status_message(&snapshot));
                }
                None => {
                    ui.label("Starting game...");
                }
            }
        });

        // Snapshots come from the session thread; poll for them.
        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
