//! ESP-IDF backends for the pin capabilities and the console UART.
//!
//! Digital I/O goes straight to the GPIO driver. Analog write uses LEDC
//! PWM (8-bit, one channel per pin, assigned on first use). Analog read
//! uses ADC1 in oneshot mode.

use core::fmt;

use esp_idf_svc::hal::delay::NON_BLOCK;
use esp_idf_svc::hal::gpio::AnyIOPin;
use esp_idf_svc::hal::peripheral::Peripheral;
use esp_idf_svc::hal::uart::{self, UartDriver};
use esp_idf_svc::hal::units::Hertz;
use esp_idf_svc::sys::{self, esp, EspError};

use super::{Pin, PinError, PinIo, PinMode, SerialRx};
use crate::config::SerialConfig;

/// LEDC channels available for analog write
const PWM_CHANNELS: usize = 8;
const PWM_FREQ_HZ: u32 = 5_000;
const PWM_MAX_DUTY: u16 = 255;
const PWM_MODE: sys::ledc_mode_t = sys::ledc_mode_t_LEDC_LOW_SPEED_MODE;
const PWM_TIMER: sys::ledc_timer_t = sys::ledc_timer_t_LEDC_TIMER_0;

impl From<EspError> for PinError {
    fn from(e: EspError) -> Self {
        PinError::Driver(e.code())
    }
}

/// Board pins driven through ESP-IDF
pub struct EspPins {
    pwm_pins: [Option<Pin>; PWM_CHANNELS],
    pwm_timer_ready: bool,
    adc: Option<sys::adc_oneshot_unit_handle_t>,
}

impl EspPins {
    pub const fn new() -> Self {
        Self {
            pwm_pins: [None; PWM_CHANNELS],
            pwm_timer_ready: false,
            adc: None,
        }
    }

    fn pwm_channel(&mut self, pin: Pin) -> Result<sys::ledc_channel_t, PinError> {
        if let Some(ch) = self.pwm_pins.iter().position(|p| *p == Some(pin)) {
            return Ok(ch as sys::ledc_channel_t);
        }

        let ch = self
            .pwm_pins
            .iter()
            .position(Option::is_none)
            .ok_or(PinError::NotSupported(pin))?;

        if !self.pwm_timer_ready {
            let timer = sys::ledc_timer_config_t {
                speed_mode: PWM_MODE,
                duty_resolution: sys::ledc_timer_bit_t_LEDC_TIMER_8_BIT,
                timer_num: PWM_TIMER,
                freq_hz: PWM_FREQ_HZ,
                clk_cfg: sys::soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
                ..Default::default()
            };
            // SAFETY: config struct outlives the call
            esp!(unsafe { sys::ledc_timer_config(&timer) })?;
            self.pwm_timer_ready = true;
        }

        let channel = sys::ledc_channel_config_t {
            gpio_num: i32::from(pin),
            speed_mode: PWM_MODE,
            channel: ch as sys::ledc_channel_t,
            timer_sel: PWM_TIMER,
            duty: 0,
            hpoint: 0,
            ..Default::default()
        };
        // SAFETY: config struct outlives the call
        esp!(unsafe { sys::ledc_channel_config(&channel) })?;

        self.pwm_pins[ch] = Some(pin);
        Ok(ch as sys::ledc_channel_t)
    }

    fn adc_unit(&mut self) -> Result<sys::adc_oneshot_unit_handle_t, PinError> {
        if let Some(handle) = self.adc {
            return Ok(handle);
        }

        let cfg = sys::adc_oneshot_unit_init_cfg_t {
            unit_id: sys::adc_unit_t_ADC_UNIT_1,
            ..Default::default()
        };
        let mut handle: sys::adc_oneshot_unit_handle_t = core::ptr::null_mut();
        // SAFETY: handle is written by the driver on success
        esp!(unsafe { sys::adc_oneshot_new_unit(&cfg, &mut handle) })?;

        self.adc = Some(handle);
        Ok(handle)
    }
}

impl Default for EspPins {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for EspPins {
    fn drop(&mut self) {
        if let Some(handle) = self.adc.take() {
            // SAFETY: handle came from adc_oneshot_new_unit and is dropped once
            unsafe {
                sys::adc_oneshot_del_unit(handle);
            }
        }
    }
}

impl PinIo for EspPins {
    fn set_mode(&mut self, pin: Pin, mode: PinMode) -> Result<(), PinError> {
        let gpio_mode = match mode {
            PinMode::Input => sys::gpio_mode_t_GPIO_MODE_INPUT,
            // Keep the input stage on so `dr` reads back what `dw` wrote
            PinMode::Output => sys::gpio_mode_t_GPIO_MODE_INPUT_OUTPUT,
        };
        // SAFETY: GPIO driver validates the pin number
        esp!(unsafe { sys::gpio_set_direction(i32::from(pin), gpio_mode) })
            .map_err(|_| PinError::InvalidPin(pin))
    }

    fn digital_write(&mut self, pin: Pin, high: bool) -> Result<(), PinError> {
        // SAFETY: GPIO driver validates the pin number
        esp!(unsafe { sys::gpio_set_level(i32::from(pin), u32::from(high)) })
            .map_err(|_| PinError::InvalidPin(pin))
    }

    fn digital_read(&mut self, pin: Pin) -> Result<bool, PinError> {
        if !(0..sys::gpio_num_t_GPIO_NUM_MAX).contains(&i32::from(pin)) {
            return Err(PinError::InvalidPin(pin));
        }
        // SAFETY: pin number checked above
        Ok(unsafe { sys::gpio_get_level(i32::from(pin)) } != 0)
    }

    fn analog_write(&mut self, pin: Pin, value: u16) -> Result<(), PinError> {
        let channel = self.pwm_channel(pin)?;
        let duty = u32::from(value.min(PWM_MAX_DUTY));
        // SAFETY: channel was configured by pwm_channel
        unsafe {
            esp!(sys::ledc_set_duty(PWM_MODE, channel, duty))?;
            esp!(sys::ledc_update_duty(PWM_MODE, channel))?;
        }
        Ok(())
    }

    fn analog_read(&mut self, pin: Pin) -> Result<u16, PinError> {
        let handle = self.adc_unit()?;

        let mut unit: sys::adc_unit_t = 0;
        let mut channel: sys::adc_channel_t = 0;
        // SAFETY: out-params are valid for the call
        esp!(unsafe { sys::adc_oneshot_io_to_channel(i32::from(pin), &mut unit, &mut channel) })
            .map_err(|_| PinError::NotSupported(pin))?;
        if unit != sys::adc_unit_t_ADC_UNIT_1 {
            return Err(PinError::NotSupported(pin));
        }

        let chan_cfg = sys::adc_oneshot_chan_cfg_t {
            atten: sys::adc_atten_t_ADC_ATTEN_DB_12,
            bitwidth: sys::adc_bitwidth_t_ADC_BITWIDTH_DEFAULT,
        };
        let mut raw: i32 = 0;
        // SAFETY: handle is live, out-param valid for the call
        unsafe {
            esp!(sys::adc_oneshot_config_channel(handle, channel, &chan_cfg))?;
            esp!(sys::adc_oneshot_read(handle, channel, &mut raw))?;
        }

        Ok(raw.clamp(0, i32::from(u16::MAX)) as u16)
    }
}

/// Initialize the console UART (RX + TX) on the configured pins.
pub fn init_console_uart<'d>(
    uart: impl Peripheral<P = impl uart::Uart> + 'd,
    config: &SerialConfig,
) -> Result<UartDriver<'d>, EspError> {
    let uart_config = uart::config::Config::default().baudrate(Hertz(config.baud_rate));

    // SAFETY: pin numbers come from board configuration and are not
    // handed out to any other driver
    let (tx, rx) = unsafe { (AnyIOPin::new(config.tx_pin), AnyIOPin::new(config.rx_pin)) };

    UartDriver::new(
        uart,
        tx,
        rx,
        Option::<AnyIOPin>::None, // CTS
        Option::<AnyIOPin>::None, // RTS
        &uart_config,
    )
}

/// Console serial port over an ESP-IDF UART
pub struct EspSerial<'d> {
    uart: UartDriver<'d>,
}

impl<'d> EspSerial<'d> {
    pub fn new(uart: UartDriver<'d>) -> Self {
        Self { uart }
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> fmt::Result {
        self.uart.write(bytes).map(|_| ()).map_err(|_| fmt::Error)
    }
}

impl SerialRx for EspSerial<'_> {
    fn read_byte(&mut self) -> Option<u8> {
        let mut byte = [0u8; 1];
        match self.uart.read(&mut byte, NON_BLOCK) {
            Ok(1) => Some(byte[0]),
            _ => None,
        }
    }
}

impl fmt::Write for EspSerial<'_> {
    /// Serial terminals expect CRLF line endings
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let mut parts = s.split('\n');
        if let Some(first) = parts.next() {
            self.write_bytes(first.as_bytes())?;
        }
        for part in parts {
            self.write_bytes(b"\r\n")?;
            self.write_bytes(part.as_bytes())?;
        }
        Ok(())
    }
}
