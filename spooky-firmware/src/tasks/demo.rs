//! Demo task
//!
//! Builds the scene once under the panel lock, then keeps the panel in
//! sync on a one second tick.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI1;
use embassy_rp::spi::{Async, Spi};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::{Duration, Ticker};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use spooky_assets::AssetStore;
use spooky_core::config::DemoConfig;
use spooky_core::{fill_from_asset, AssetSource, ColorBuffer, SPRITE_PIXELS};
use spooky_display::{FrameBuffer, Scene};

use crate::st7789::{Error, St7789};

/// Refresh interval of the idle loop
const TICK_INTERVAL_MS: u64 = 1000;

type Lcd = St7789<Spi<'static, SPI1, Async>, Output<'static>, Output<'static>, Output<'static>>;

/// The LCD together with the frame drawn onto it
pub struct Panel {
    pub lcd: Lcd,
    pub frame: FrameBuffer<'static>,
    /// Held so the backlight stays driven
    pub _backlight: Output<'static>,
}

impl Panel {
    /// Push the frame to the LCD if anything changed
    pub async fn flush(&mut self) -> Result<(), Error<embassy_rp::spi::Error>> {
        if !self.frame.is_dirty() {
            return Ok(());
        }
        self.lcd.flush(&mut self.frame).await
    }
}

/// Panel shared between tasks; hold the lock for every draw and flush
pub type PanelMutex = Mutex<CriticalSectionRawMutex, Panel>;

/// Demo task - paints the configured sprite below the label
#[embassy_executor::task]
pub async fn demo_task(
    panel: &'static PanelMutex,
    assets: &'static mut AssetStore,
    canvas: &'static mut ColorBuffer<SPRITE_PIXELS>,
    config: &'static DemoConfig,
) {
    info!("Demo task started");

    let pixel_count = config.canvas.size().pixel_count();
    let Some(pixels) = canvas.as_mut_slice().get_mut(..pixel_count) else {
        error!("Canvas of {} pixels exceeds the color buffer", pixel_count);
        return;
    };

    // Shown when the asset cannot be used
    pixels.fill(config.canvas.fallback_color());

    assets.load();
    info!("{} sprites decoded", assets.loaded_count());

    let asset = config.demo.asset.as_str();
    match fill_from_asset(assets.raw(asset), pixels) {
        Ok(true) => info!("Asset '{}' painted", asset),
        Ok(false) => warn!("Asset '{}' unavailable, showing fallback", asset),
        Err(e) => error!("Asset '{}' malformed: {:?}", asset, e),
    }

    let mut scene = Scene::from_config(config);
    if let Err(e) = scene.attach(&canvas.as_slice()[..pixel_count], assets.format()) {
        error!("Canvas rejected buffer: {:?}", e);
    }

    {
        let mut panel = panel.lock().await;
        let frame = &mut panel.frame;
        frame.clear(Rgb565::BLACK).unwrap_or_else(|e| match e {});
        scene.draw(frame).unwrap_or_else(|e| match e {});

        let bounds = scene.bounding_box();
        info!(
            "Scene drawn at ({}, {}) {}x{}",
            bounds.top_left.x, bounds.top_left.y, bounds.size.width, bounds.size.height
        );

        if let Err(e) = panel.flush().await {
            error!("LCD flush failed: {}", e);
        }
    }

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));

    loop {
        ticker.next().await;

        let mut panel = panel.lock().await;
        if let Err(e) = panel.flush().await {
            warn!("LCD flush failed: {}", e);
        }
    }
}
