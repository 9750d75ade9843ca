//! Terminal presentation of the draw
//!
//! Reads the birth date from stdin, renders the shuffle, the horse race and
//! the loading lines, prints the result card and offers save / again / quit.

use std::future::Future;
use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use rand::Rng;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::watch;

use crate::application::ports::outbound::InterpretationPort;
use crate::application::services::{DrawError, DrawOrchestrator, DrawPhase, DrawView};
use crate::domain::entities::DrawResult;
use crate::infrastructure::export::CardExporter;

const TRACK_WIDTH: usize = 30;
const FRAMES_PER_LAP: u32 = 25;

/// Interactive terminal session
pub struct TerminalApp<I: InterpretationPort, R: Rng> {
    draw: DrawOrchestrator<I, R>,
    exporter: CardExporter,
    lines: Lines<BufReader<Stdin>>,
}

enum AfterResult {
    Again,
    Quit,
}

enum ShuffleEnd {
    Stopped,
    Interrupted,
    Closed,
}

impl<I: InterpretationPort, R: Rng> TerminalApp<I, R> {
    pub fn new(draw: DrawOrchestrator<I, R>, exporter: CardExporter) -> Self {
        Self {
            draw,
            exporter,
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Run draws until the user quits or stdin closes
    pub async fn run(&mut self) -> Result<()> {
        println!();
        println!("  GIEO QUẺ - Mã Đáo Thành Công");
        println!("  \"Giải mã vận mệnh - Đón lộc đầu xuân\"");

        loop {
            println!();
            println!("Khai mở bí mật của bạn - nhập ngày sinh:");
            let Some(day) = self.prompt("  Ngày: ").await? else { return Ok(()) };
            let Some(month) = self.prompt("  Tháng: ").await? else { return Ok(()) };
            let Some(year) = self.prompt("  Năm: ").await? else { return Ok(()) };

            match self.draw.submit(&day, &month, &year) {
                Ok(()) => {}
                Err(DrawError::Validation(_)) => {
                    if let Some(error) = &self.draw.view().error {
                        println!("  ⚠ {}", error);
                    }
                    continue;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Unexpected submit state, resetting");
                    self.draw.reset();
                    continue;
                }
            }

            if self.draw.phase() == DrawPhase::Shuffling {
                match self.shuffle().await? {
                    ShuffleEnd::Stopped => {}
                    ShuffleEnd::Interrupted => continue,
                    ShuffleEnd::Closed => return Ok(()),
                }
            }

            self.race().await?;

            match self.draw.phase() {
                DrawPhase::Result => match self.after_result().await? {
                    AfterResult::Again => self.draw.reset(),
                    AfterResult::Quit => return Ok(()),
                },
                _ => {
                    if let Some(error) = &self.draw.view().error {
                        println!("  ⚠ {}", error);
                    }
                }
            }
        }
    }

    /// Cycle candidates until Enter, Ctrl+C or end of input
    async fn shuffle(&mut self) -> Result<ShuffleEnd> {
        println!("  Đang xóc quẻ... nhấn Enter để dừng");
        let mut ticker = tokio::time::interval(self.draw.settings().shuffle_tick());
        loop {
            tokio::select! {
                line = self.lines.next_line() => {
                    if line?.is_none() {
                        return Ok(ShuffleEnd::Closed);
                    }
                    self.draw.stop_shuffling()?;
                    println!();
                    return Ok(ShuffleEnd::Stopped);
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupted, abandoning shuffle");
                    self.draw.reset();
                    println!();
                    return Ok(ShuffleEnd::Interrupted);
                }
                _ = ticker.tick() => {
                    let candidate = self.draw.shuffle_tick()?;
                    print!("\r  🎴 {:<20}", candidate.name);
                    let _ = std::io::stdout().flush();
                }
            }
        }
    }

    /// Play the horse race while the orchestrator joins the request
    async fn race(&mut self) -> Result<()> {
        println!("  Ngựa đang thỉnh lộc...");

        let signal = self.draw.reset_signal();
        let interrupt = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Interrupted, abandoning draw");
                signal.request();
            }
        });
        let loading = tokio::spawn(render_loading(self.draw.subscribe()));

        let lap_duration = self.draw.settings().lap_duration();
        let laps = self.draw.settings().ceremony_laps;
        let views = self.draw.subscribe();
        let draw = &mut self.draw;
        let (_, outcome) = discarding_input(&mut self.lines, async move {
            tokio::join!(
                render_race(views, lap_duration, laps),
                draw.on_animation_complete()
            )
        })
        .await;

        interrupt.abort();
        loading.abort();
        outcome?;
        Ok(())
    }

    async fn after_result(&mut self) -> Result<AfterResult> {
        if let Some(result) = self.draw.result() {
            println!();
            println!("{}", render_card(result));
        }

        loop {
            let Some(choice) = self.prompt("[Enter] gieo lại  [s] lưu quẻ  [q] thoát: ").await? else {
                return Ok(AfterResult::Quit);
            };
            match choice.trim() {
                "" => return Ok(AfterResult::Again),
                "q" | "Q" => return Ok(AfterResult::Quit),
                "s" | "S" => self.save().await,
                other => println!("  Không hiểu lựa chọn '{}'", other),
            }
        }
    }

    async fn save(&self) {
        let (Some(birth_date), Some(result)) = (self.draw.birth_date(), self.draw.result()) else {
            return;
        };
        match self.exporter.export(birth_date, result).await {
            Ok(path) => println!("  📸 Đã lưu quẻ: {}", path.display()),
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                println!("  Ui da, máy ảnh bị kẹt! Bạn thử chụp màn hình thủ công nha.");
            }
        }
    }

    async fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        print!("{}", label);
        std::io::stdout().flush()?;
        tokio::select! {
            line = self.lines.next_line() => Ok(line?),
            _ = tokio::signal::ctrl_c() => {
                println!();
                Ok(None)
            }
        }
    }
}

/// Drive `task` to completion, dropping any lines typed meanwhile
///
/// Keeps an Enter pressed during the race from answering the next prompt.
async fn discarding_input<B, T>(lines: &mut Lines<B>, task: impl Future<Output = T>) -> T
where
    B: AsyncBufRead + Unpin,
{
    tokio::pin!(task);
    let mut open = true;
    loop {
        tokio::select! {
            output = &mut task => return output,
            line = lines.next_line(), if open => match line {
                Ok(Some(line)) => tracing::debug!(line = %line, "Ignoring input during draw"),
                Ok(None) | Err(_) => open = false,
            },
        }
    }
}

/// Animate the laps; stops early if the draw leaves `Racing`
async fn render_race(views: watch::Receiver<DrawView>, lap_duration: Duration, laps: u32) {
    let frame = lap_duration / FRAMES_PER_LAP;
    for _ in 0..laps {
        for step in 0..FRAMES_PER_LAP {
            if views.borrow().phase != DrawPhase::Racing {
                println!();
                return;
            }
            let position = (step as usize * TRACK_WIDTH) / (FRAMES_PER_LAP as usize - 1);
            print!("\r  {}", race_frame(position, TRACK_WIDTH));
            let _ = std::io::stdout().flush();
            tokio::time::sleep(frame).await;
        }
    }
    println!();
}

/// Print each new loading line until the draw settles
async fn render_loading(mut views: watch::Receiver<DrawView>) {
    let mut last: Option<String> = None;
    while views.changed().await.is_ok() {
        let view = views.borrow_and_update().clone();
        match view.phase {
            DrawPhase::LoadingResult => {
                if view.loading_message != last {
                    if let Some(message) = &view.loading_message {
                        println!("  ⏳ {}", message);
                    }
                    last = view.loading_message;
                }
            }
            DrawPhase::Result | DrawPhase::Input => break,
            _ => {}
        }
    }
}

/// One frame of the track with the horse at `position`
pub fn race_frame(position: usize, width: usize) -> String {
    let position = position.min(width);
    format!(
        "|{}🐎{}|",
        "·".repeat(position),
        "·".repeat(width - position)
    )
}

/// Render the result card as text
pub fn render_card(result: &DrawResult) -> String {
    let content = &result.interpretation;
    let mut card = String::new();

    card.push_str("╔══════════════════════════════════════╗\n");
    let badges: Vec<String> = [
        content.zodiac.clone(),
        content.element.clone(),
        if content.destiny_number.is_empty() {
            String::new()
        } else {
            format!("Số: {}", content.destiny_number)
        },
    ]
    .into_iter()
    .filter(|badge| !badge.is_empty())
    .collect();
    if !badges.is_empty() {
        card.push_str(&format!("  [{}]\n", badges.join("] [")));
    }
    card.push_str(&format!("  {}\n", result.fortune.name.to_uppercase()));
    if !content.personality.is_empty() {
        card.push_str(&format!("  “{}”\n", content.personality));
    }
    card.push('\n');

    for (label, text) in [
        ("CÔNG DANH", &content.career),
        ("TÀI LỘC", &content.money),
        ("GIA ĐẠO", &content.love),
        ("SỨC KHỎE", &content.health),
    ] {
        if !text.is_empty() {
            card.push_str(&format!("  {}: {}\n", label, text));
        }
    }

    let lucky: Vec<String> = [
        ("MÀU MAY", &content.lucky_color),
        ("SỐ TÀI", &content.lucky_number),
        ("GIỜ VÀNG", &content.lucky_hour),
    ]
    .into_iter()
    .filter(|(_, value)| !value.is_empty())
    .map(|(label, value)| format!("{}: {}", label, value))
    .collect();
    if !lucky.is_empty() {
        card.push_str(&format!("\n  {}\n", lucky.join(" | ")));
    }

    if !content.warning.is_empty() {
        card.push_str(&format!("\n  🎯 Mật chỉ: {}\n", content.warning));
    }

    card.push_str("\n  ── SẤM TRUYỀN ──\n");
    for line in content.poem.lines() {
        card.push_str(&format!("  {}\n", line.trim()));
    }
    card.push_str("╚══════════════════════════════════════╝");

    card
}
