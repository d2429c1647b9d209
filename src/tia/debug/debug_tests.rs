#[cfg(test)]
mod test {
    use crate::tia::chip::TiaChip;
    use crate::tia::debug::config::{DebugConfig, TvStandard};
    use crate::tia::debug::fields::Field;
    use crate::tia::debug::state::TiaState;
    use crate::tia::debug::{DebuggerSystem, TiaDebug};
    use crate::tia::registers::WriteRegister;
    use crate::tia::test_utils::{MockTia, init_test_logger};
    use crate::tia::Object;

    #[test]
    fn test_previous_before_first_capture() {
        let debug = TiaDebug::default();
        assert!(!debug.state().is_captured());
        assert!(!debug.previous().is_captured());
        assert_eq!(debug.previous(), &TiaState::default());
        assert!(debug.changes().is_empty());
    }

    #[test]
    fn test_capture_returns_new_state() {
        let mut tia = MockTia::new();
        tia.set_register(WriteRegister::Colup1, 0x36);
        tia.tick(5);

        let mut debug = TiaDebug::default();
        let state = debug.capture(&tia).clone();
        assert_eq!(state.value(Field::ColuP1), Some(0x36));
        assert_eq!(state.stamp.map(|s| s.clock), Some(5));
        assert_eq!(debug.state(), &state);
        assert!(!debug.previous().is_captured());
    }

    #[test]
    fn test_generational_invariant() {
        init_test_logger();
        let mut tia = MockTia::new();
        let mut debug = TiaDebug::default();

        for n in 0..5u8 {
            tia.set_register(WriteRegister::Pf2, n);
            tia.tick(1);
            let before = debug.state().clone();
            debug.capture(&tia);

            assert_eq!(debug.previous(), &before);
            assert_eq!(debug.state().pf[2], n);
            assert_ne!(debug.previous(), debug.state());
        }
    }

    #[test]
    fn test_capture_mutate_capture() {
        let mut tia = MockTia::new();
        let mut debug = TiaDebug::default();

        let s1 = debug.capture(&tia).clone();
        {
            let mut regs = TiaDebug::registers(&mut tia);
            regs.colu_p0(Some(0x1E));
            regs.pos_bl(Some(12));
            regs.gr_p0(Some(0xFF));
        }
        tia.tick(1);
        debug.capture(&tia);

        assert_eq!(debug.previous(), &s1);
        assert_eq!(debug.changes(), vec![Field::ColuP0, Field::GrP0, Field::PosBL]);

        let report = debug.render(&tia);
        assert!(report.contains("COLUP0: *$1E gold/7"));
        assert!(report.contains("P0: GR=*%11111111"));
        assert!(report.contains("pos=*12"));
    }

    #[test]
    fn test_render_without_capture() {
        let mut tia = MockTia::new();
        tia.set_register(WriteRegister::Vsync, 0x02);
        tia.tick(230);

        let debug = TiaDebug::default();
        assert_eq!(
            debug.render(&tia),
            "scanline 1 frame 0 clk 2 vsync: Yes vblank: No\nTIA state: <not captured>"
        );
    }

    #[test]
    fn test_render_reads_counters_live() {
        let mut tia = MockTia::new();
        let mut debug = TiaDebug::default();
        debug.capture(&tia);
        tia.tick(7);

        let report = debug.render(&tia);
        assert!(report.lines().any(|l| l.starts_with("scanline 0 frame 0 clk 7 ")));
    }

    #[test]
    fn test_config_is_used_for_rendering() {
        let mut tia = MockTia::new();
        tia.set_register(WriteRegister::Colubk, 0x0E);
        let config = DebugConfig::default()
            .with_tv_standard(TvStandard::Secam)
            .with_mark_changes(false);
        let mut debug = TiaDebug::new(config);
        debug.capture(&tia);

        assert_eq!(debug.config().tv_standard, TvStandard::Secam);
        assert!(debug.render(&tia).contains("COLUBK: $0E white"));
    }

    #[test]
    fn test_delay_queue_counts() {
        let mut tia = MockTia::new();
        assert_eq!(TiaDebug::delay_queue_iterator(&tia).count(), 0);

        tia.poke(WriteRegister::Grp0.addr(), 1);
        tia.poke(WriteRegister::Grp1.addr(), 2);
        tia.poke(WriteRegister::Pf0.addr(), 3);
        tia.poke(WriteRegister::Hmove.addr(), 0);
        assert_eq!(TiaDebug::delay_queue_iterator(&tia).count(), 4);

        let mut iter = TiaDebug::delay_queue_iterator(&tia);
        for _ in 0..4 {
            assert!(iter.next().is_some());
        }
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_debugger_system_on_step() {
        let mut tia = MockTia::new();
        let mut debug = TiaDebug::default();

        fn step<D: DebuggerSystem<MockTia>>(debugger: &mut D, tia: &MockTia) {
            debugger.on_step(tia);
        }

        step(&mut debug, &tia);
        tia.set_position(Object::P1, 99);
        step(&mut debug, &tia);

        let system: &dyn DebuggerSystem<MockTia, State = TiaState> = &debug;
        assert_eq!(system.state().position(Object::P1), 99);
        assert_eq!(system.old_state().position(Object::P1), 0);
        assert!(system.render(&tia).contains("P1: GR=%00000000 pos=*99"));
    }
}
