//! Spooky - Sprite Canvas Demo Firmware
//!
//! Main firmware binary for RP2040 boards with a 240x240 ST7789 LCD.
//! Decodes a bundled 16x16 sprite and paints it onto a canvas centered
//! below a greeting label.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::spi::{Config as SpiConfig, Spi};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use static_cell::{ConstStaticCell, StaticCell};
use {defmt_rtt as _, panic_probe as _};

use spooky_assets::AssetStore;
use spooky_core::config::DemoConfig;
use spooky_core::{ColorBuffer, SPRITE_PIXELS};
use spooky_display::FrameBuffer;

use crate::st7789::St7789;
use crate::tasks::{Panel, PanelMutex};

mod config;
mod st7789;
mod tasks;

/// Frame buffer capacity, the largest panel the firmware drives
const MAX_PANEL_PIXELS: usize = 240 * 240;

// Static cells (must live forever for task references)
static CONFIG: StaticCell<DemoConfig> = StaticCell::new();
static FRAME_PIXELS: ConstStaticCell<[Rgb565; MAX_PANEL_PIXELS]> =
    ConstStaticCell::new([Rgb565::BLACK; MAX_PANEL_PIXELS]);
static CANVAS: StaticCell<ColorBuffer<SPRITE_PIXELS>> = StaticCell::new();
static ASSETS: StaticCell<AssetStore> = StaticCell::new();
static PANEL: StaticCell<PanelMutex> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Spooky firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config: &'static DemoConfig = CONFIG.init(config::load_config());

    // Panel wiring (board-specific): SPI1 CLK=GPIO10, MOSI=GPIO11,
    // CS=GPIO9, DC=GPIO8, RST=GPIO12, backlight=GPIO13
    let mut spi_config = SpiConfig::default();
    spi_config.frequency = config.display.spi_hz;
    let spi = Spi::new_txonly(p.SPI1, p.PIN_10, p.PIN_11, p.DMA_CH0, spi_config);

    let cs = Output::new(p.PIN_9, Level::High);
    let dc = Output::new(p.PIN_8, Level::Low);
    let rst = Output::new(p.PIN_12, Level::High);
    let backlight = Output::new(p.PIN_13, Level::High);

    let mut lcd = St7789::new(spi, cs, dc, rst, config.display.width, config.display.height);
    if let Err(e) = lcd.init().await {
        error!("LCD init failed: {}", e);
    }
    info!("LCD initialized");

    let screen = Size::new(config.display.width as u32, config.display.height as u32);
    let pixels = FRAME_PIXELS.take();
    let screen_pixels = (screen.width * screen.height) as usize;
    let Some(pixels) = pixels.get_mut(..screen_pixels) else {
        error!("Display {}x{} exceeds the frame buffer", screen.width, screen.height);
        return;
    };
    let frame = match FrameBuffer::new(pixels, screen) {
        Ok(frame) => frame,
        Err(e) => {
            error!("Frame buffer setup failed: {:?}", e);
            return;
        }
    };

    let panel: &'static PanelMutex = PANEL.init(PanelMutex::new(Panel {
        lcd,
        frame,
        _backlight: backlight,
    }));
    let canvas = CANVAS.init(ColorBuffer::new());
    let assets = ASSETS.init(AssetStore::with_format(config.demo.pixel_format));

    spawner
        .spawn(tasks::demo_task(panel, assets, canvas, config))
        .unwrap();

    info!("All tasks spawned");
}
