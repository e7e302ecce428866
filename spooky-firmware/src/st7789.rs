//! ST7789 TFT Display Driver
//!
//! Driver for 240x240 ST7789-based color LCDs over a write-only SPI bus.
//! Pixels are streamed as RGB565, big-endian, from a [`FrameBuffer`].

use embassy_time::Timer;
use embedded_hal::digital::OutputPin;
use embedded_hal_async::spi::SpiBus;

use spooky_display::FrameBuffer;

/// Bytes sent per SPI transfer while flushing
const CHUNK_BYTES: usize = 512;

/// ST7789 commands
mod cmd {
    pub const SWRESET: u8 = 0x01;
    pub const SLPOUT: u8 = 0x11;
    pub const NORON: u8 = 0x13;
    pub const INVON: u8 = 0x21;
    pub const DISPON: u8 = 0x29;
    pub const CASET: u8 = 0x2A;
    pub const RASET: u8 = 0x2B;
    pub const RAMWR: u8 = 0x2C;
    pub const MADCTL: u8 = 0x36;
    pub const COLMOD: u8 = 0x3A;
}

/// Driver errors
#[derive(Debug)]
pub enum Error<E> {
    /// SPI transfer failed
    Spi(E),
    /// Control pin could not be driven
    Pin,
}

impl<E: core::fmt::Debug> defmt::Format for Error<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::Spi(e) => defmt::write!(f, "Spi({})", defmt::Debug2Format(e)),
            Error::Pin => defmt::write!(f, "Pin"),
        }
    }
}

/// ST7789 LCD driver
pub struct St7789<SPI, CS, DC, RST> {
    spi: SPI,
    cs: CS,
    dc: DC,
    rst: RST,
    width: u16,
    height: u16,
    chunk: [u8; CHUNK_BYTES],
}

impl<SPI, CS, DC, RST> St7789<SPI, CS, DC, RST>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Create a new driver for a `width` x `height` panel
    pub fn new(spi: SPI, cs: CS, dc: DC, rst: RST, width: u16, height: u16) -> Self {
        Self {
            spi,
            cs,
            dc,
            rst,
            width,
            height,
            chunk: [0; CHUNK_BYTES],
        }
    }

    /// Reset and initialize the panel for 16-bit color
    pub async fn init(&mut self) -> Result<(), Error<SPI::Error>> {
        self.rst.set_high().map_err(|_| Error::Pin)?;
        Timer::after_millis(10).await;
        self.rst.set_low().map_err(|_| Error::Pin)?;
        Timer::after_millis(10).await;
        self.rst.set_high().map_err(|_| Error::Pin)?;
        Timer::after_millis(120).await;

        self.command(cmd::SWRESET, &[]).await?;
        Timer::after_millis(150).await;
        self.command(cmd::SLPOUT, &[]).await?;
        Timer::after_millis(10).await;

        self.command(cmd::COLMOD, &[0x55]).await?; // 16 bits per pixel
        self.command(cmd::MADCTL, &[0x00]).await?; // Top-left origin, RGB order
        self.command(cmd::INVON, &[]).await?; // IPS panels need inversion
        self.command(cmd::NORON, &[]).await?;
        Timer::after_millis(10).await;
        self.command(cmd::DISPON, &[]).await?;
        Timer::after_millis(10).await;

        Ok(())
    }

    /// Send a command followed by its parameters
    async fn command(&mut self, command: u8, params: &[u8]) -> Result<(), Error<SPI::Error>> {
        self.cs.set_low().map_err(|_| Error::Pin)?;

        self.dc.set_low().map_err(|_| Error::Pin)?;
        let result = self.spi.write(&[command]).await;
        let result = match result {
            Ok(()) if !params.is_empty() => {
                self.dc.set_high().map_err(|_| Error::Pin)?;
                self.spi.write(params).await
            }
            other => other,
        };
        let result = match result {
            Ok(()) => self.spi.flush().await,
            Err(e) => Err(e),
        };

        self.cs.set_high().map_err(|_| Error::Pin)?;
        result.map_err(Error::Spi)
    }

    /// Set the RAM window written by the next RAMWR, inclusive corners
    async fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), Error<SPI::Error>> {
        let [x0h, x0l] = x0.to_be_bytes();
        let [x1h, x1l] = x1.to_be_bytes();
        let [y0h, y0l] = y0.to_be_bytes();
        let [y1h, y1l] = y1.to_be_bytes();

        self.command(cmd::CASET, &[x0h, x0l, x1h, x1l]).await?;
        self.command(cmd::RASET, &[y0h, y0l, y1h, y1l]).await
    }

    /// Stream the whole frame buffer to the panel
    pub async fn flush(&mut self, frame: &mut FrameBuffer<'_>) -> Result<(), Error<SPI::Error>> {
        self.set_window(0, 0, self.width - 1, self.height - 1).await?;

        self.cs.set_low().map_err(|_| Error::Pin)?;
        self.dc.set_low().map_err(|_| Error::Pin)?;
        let mut result = self.spi.write(&[cmd::RAMWR]).await;

        if result.is_ok() {
            self.dc.set_high().map_err(|_| Error::Pin)?;

            let mut start = 0;
            loop {
                let count = frame.write_be_bytes(start, &mut self.chunk);
                if count == 0 {
                    break;
                }
                let bytes = count * spooky_display::WIRE_BYTES_PER_PIXEL;
                if let Err(e) = self.spi.write(&self.chunk[..bytes]).await {
                    result = Err(e);
                    break;
                }
                start += count;
            }
        }
        if result.is_ok() {
            result = self.spi.flush().await;
        }

        self.cs.set_high().map_err(|_| Error::Pin)?;
        result.map_err(Error::Spi)?;

        frame.mark_clean();
        Ok(())
    }
}
