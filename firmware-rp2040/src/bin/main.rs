#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::{info, warn};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::Pwm;
use embassy_rp::uart::{Async, Config as UartConfig, Uart, UartRx};
use embassy_rp::watchdog::Watchdog;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::{Duration, Instant, Ticker};
use rc_drive_rp2040::{
    pwm_config, ActiveSource, DriveConfig, DrivePipeline, DutyCurve, HbridgeDrive, MixMode,
    MotorLines, OutputPolarities, RcChannel, SharedPipeline,
};
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    UART0_IRQ => embassy_rp::uart::InterruptHandler<UART0>;
});

/// The drive pipeline, shared between all input and timer tasks.
static PIPELINE: StaticCell<SharedPipeline> = StaticCell::new();

/// Watchdog fail-safe window. Valid input arrives every few milliseconds
/// from either source, so 250 ms of silence means the signal is gone.
const WATCHDOG_WINDOW: Duration = Duration::from_millis(250);

/// Status LED and diagnostics cadence.
const TICK_PERIOD: Duration = Duration::from_millis(250);

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("rc-drive starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    let drive_config = DriveConfig {
        mix_mode: if cfg!(feature = "independent-mix") {
            MixMode::Independent
        } else {
            MixMode::Differential
        },
        ..DriveConfig::default()
    };
    let curve = DutyCurve::from_percentages(drive_config.min_duty_pct, drive_config.max_duty_pct);
    let polarities = OutputPolarities::default();

    // --- Motor Outputs ---
    let slice_config = pwm_config(&curve, polarities.pwm);
    let motor_a = MotorLines {
        pwm: Pwm::new_output_a(p.PWM_SLICE2, p.PIN_4, slice_config.clone()),
        forward: Output::new(p.PIN_10, Level::Low),
        reverse: Output::new(p.PIN_11, Level::Low),
    };
    let motor_b = MotorLines {
        pwm: Pwm::new_output_a(p.PWM_SLICE3, p.PIN_6, slice_config),
        forward: Output::new(p.PIN_12, Level::Low),
        reverse: Output::new(p.PIN_13, Level::Low),
    };
    let led = Output::new(p.PIN_25, Level::Low);

    // --- Watchdog ---
    let mut watchdog = Watchdog::new(p.WATCHDOG);
    if cfg!(feature = "diagnostics") {
        info!("diagnostics build: watchdog disabled");
    } else {
        watchdog.start(WATCHDOG_WINDOW);
    }

    let hal = HbridgeDrive::new(motor_a, motor_b, led, watchdog, &curve, polarities);
    let pipeline: &'static SharedPipeline =
        PIPELINE.init(Mutex::new(RefCell::new(DrivePipeline::new(hal, drive_config))));

    // --- iBUS UART ---
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = 115_200;

    let uart = Uart::new(
        p.UART0,
        p.PIN_0, // TX (unused)
        p.PIN_1, // RX
        Irqs,
        p.DMA_CH0,
        p.DMA_CH1,
        uart_config,
    );
    let (_tx, rx) = uart.split();

    // --- Pulse Capture Inputs ---
    let capture_1 = Input::new(p.PIN_2, Pull::Up);
    let capture_2 = Input::new(p.PIN_3, Pull::Up);

    spawner.spawn(ibus_task(rx, pipeline)).unwrap();
    spawner
        .spawn(pulse_task(capture_1, RcChannel::Ch1, pipeline))
        .unwrap();
    spawner
        .spawn(pulse_task(capture_2, RcChannel::Ch2, pipeline))
        .unwrap();
    spawner.spawn(tick_task(pipeline)).unwrap();
    #[cfg(feature = "diagnostics")]
    spawner.spawn(diagnostics_task(pipeline)).unwrap();

    info!("rc-drive initialized, waiting for signal...");
}

/// iBUS task - feeds UART bytes to the frame decoder one at a time.
#[embassy_executor::task]
async fn ibus_task(mut rx: UartRx<'static, Async>, pipeline: &'static SharedPipeline) {
    let mut byte_buf = [0u8; 1];
    loop {
        match rx.read(&mut byte_buf).await {
            Ok(()) => {
                let result = pipeline.lock(|pl| pl.borrow_mut().on_serial_byte(byte_buf[0]));
                if let Err(e) = result {
                    warn!("iBUS frame dropped: {}", e);
                }
            }
            Err(e) => warn!("UART error: {}", e),
        }
    }
}

/// Pulse capture task - one per RC channel.
///
/// Alternates between rising and falling edge waits, like a capture unit
/// toggling its edge select. Exits once the serial source has taken over;
/// the pin stays configured but nothing reads it anymore.
#[embassy_executor::task(pool_size = 2)]
async fn pulse_task(
    mut pin: Input<'static>,
    channel: RcChannel,
    pipeline: &'static SharedPipeline,
) {
    loop {
        pin.wait_for_rising_edge().await;
        let timestamp = Instant::now().as_micros() as u16;
        if pipeline.lock(|pl| pl.borrow_mut().on_edge(channel, timestamp)) == ActiveSource::Serial {
            break;
        }

        pin.wait_for_falling_edge().await;
        let timestamp = Instant::now().as_micros() as u16;
        if pipeline.lock(|pl| pl.borrow_mut().on_edge(channel, timestamp)) == ActiveSource::Serial {
            break;
        }
    }
    info!("{} pulse capture released, serial source active", channel);
}

/// Tick task - drives the status LED blink pattern.
#[embassy_executor::task]
async fn tick_task(pipeline: &'static SharedPipeline) {
    let mut ticker = Ticker::every(TICK_PERIOD);
    loop {
        ticker.next().await;
        pipeline.lock(|pl| pl.borrow_mut().on_tick());
    }
}

/// Diagnostics task - periodic state dump for bench bring-up.
#[cfg(feature = "diagnostics")]
#[embassy_executor::task]
async fn diagnostics_task(pipeline: &'static SharedPipeline) {
    let mut ticker = Ticker::every(TICK_PERIOD);
    loop {
        ticker.next().await;
        let s = pipeline.lock(|pl| pl.borrow().snapshot());
        info!(
            "raw {=u16} {=u16} | value {=i16} {=i16} | duty {=u16} {=u16} | fwd {} {} rev {} {} | {} cycles {=u32}",
            s.channels[0].raw,
            s.channels[1].raw,
            s.channels[0].value,
            s.channels[1].value,
            s.outputs[0].duty,
            s.outputs[1].duty,
            s.outputs[0].forward,
            s.outputs[1].forward,
            s.outputs[0].reverse,
            s.outputs[1].reverse,
            s.source,
            s.cycles,
        );
    }
}
