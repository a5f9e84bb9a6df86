use winit::event::WindowEvent;

use super::SessionEvent;

/// Translates a winit `WindowEvent` into a [`SessionEvent`].
pub fn translate_window_event(event: &WindowEvent) -> SessionEvent {
    match event {
        WindowEvent::CloseRequested | WindowEvent::Destroyed => SessionEvent::CloseRequested,
        WindowEvent::Resized(size) => SessionEvent::Resized {
            width: size.width,
            height: size.height,
        },
        _ => SessionEvent::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalSize;

    #[test]
    fn close_and_destroy_request_close() {
        assert_eq!(translate_window_event(&WindowEvent::CloseRequested), SessionEvent::CloseRequested);
        assert_eq!(translate_window_event(&WindowEvent::Destroyed), SessionEvent::CloseRequested);
    }

    #[test]
    fn resize_carries_physical_size() {
        let ev = WindowEvent::Resized(PhysicalSize::new(800, 1000));
        assert_eq!(
            translate_window_event(&ev),
            SessionEvent::Resized { width: 800, height: 1000 }
        );
    }

    #[test]
    fn everything_else_is_other() {
        assert_eq!(translate_window_event(&WindowEvent::Focused(true)), SessionEvent::Other);
        assert_eq!(translate_window_event(&WindowEvent::RedrawRequested), SessionEvent::Other);
        assert_eq!(
            translate_window_event(&WindowEvent::Occluded(false)),
            SessionEvent::Other
        );
    }
}
